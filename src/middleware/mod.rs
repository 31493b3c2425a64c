/*
 * Responsibility
 * - middleware の公開インターフェース
 */
pub mod approov;
pub mod http;
