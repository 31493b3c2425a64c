/*
 * Responsibility
 * - tokio runtime
 * - app::run() の呼び出し（ロジックは置かない）
 */
use anyhow::Result;

use approov_gate::app;

#[tokio::main]
async fn main() -> Result<()> {
    app::run().await
}
