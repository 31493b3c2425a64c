/*
 * Responsibility
 * - ドメインサービス (HTTP に依存しない検証ロジック)
 */
pub mod approov;
