//! GitHub Actions workflow commands
//!
//! Runner 从 stdout 解析 `::warning::` / `::error::` 并显示为 annotation。

/// 转义消息中的 `%`、`\r`、`\n`
pub fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// 组装 workflow command 文本
pub fn command(name: &str, message: &str) -> String {
    format!("::{}::{}", name, escape_data(message))
}

/// 输出 warning annotation
pub fn warning(message: &str) {
    println!("{}", command("warning", message));
}

/// 输出 error annotation（等价于 Actions toolkit 的 setFailed）
pub fn error(message: &str) {
    println!("{}", command("error", message));
}
