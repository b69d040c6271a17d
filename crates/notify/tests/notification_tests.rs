//! 真实投递的集成测试。默认全部 `#[ignore]`：
//! 需要的凭据从 `.env` / 环境变量读取，手动开启运行。

use kanshi_core::notify::port::Notifier;
use kanshi_notify::email::EmailNotifier;
use kanshi_notify::telegram::TelegramNotifier;
use std::env;

const SUBJECT: &str = "BTC price alert";
const CONTENT: &str = "The price of BTC (500000 USD) breached the upper threshold of 80000.";

/// reqwest 以 rustls-no-provider 编译，构建客户端前装好 CryptoProvider
fn install_tls_provider() {
    rustls::crypto::ring::default_provider().install_default().ok();
}

/// 走真实 Telegram Bot API 投递一条测试告警。
/// 需要 `KANSHI_TG_BOT_TOKEN` 与 `KANSHI_TG_CHAT_ID`。
#[tokio::test]
#[ignore]
async fn telegram_delivery_roundtrip() {
    install_tls_provider();
    let _ = dotenvy::dotenv();
    let bot_token = env::var("KANSHI_TG_BOT_TOKEN").expect("KANSHI_TG_BOT_TOKEN must be set");
    let chat_id = env::var("KANSHI_TG_CHAT_ID").expect("KANSHI_TG_CHAT_ID must be set");

    let notifier = TelegramNotifier::new(bot_token);
    let result = notifier.notify(&chat_id, SUBJECT, CONTENT).await;

    assert!(result.is_ok(), "telegram delivery failed: {result:?}");
}

/// 走真实 SMTP 中继投递一条测试告警邮件。
/// 需要 `KANSHI_EMAIL_HOST/USER/PASS/FROM/TO`。
#[tokio::test]
#[ignore]
async fn email_delivery_roundtrip() {
    install_tls_provider();
    let _ = dotenvy::dotenv();
    let host = env::var("KANSHI_EMAIL_HOST").expect("KANSHI_EMAIL_HOST must be set");
    let user = env::var("KANSHI_EMAIL_USER").expect("KANSHI_EMAIL_USER must be set");
    let pass = env::var("KANSHI_EMAIL_PASS").expect("KANSHI_EMAIL_PASS must be set");
    let from = env::var("KANSHI_EMAIL_FROM").expect("KANSHI_EMAIL_FROM must be set");
    let to = env::var("KANSHI_EMAIL_TO").expect("KANSHI_EMAIL_TO must be set");

    let notifier = EmailNotifier::new(&host, &user, &pass, &from).expect("bad SMTP config");
    let result = notifier.notify(&to, SUBJECT, CONTENT).await;

    assert!(result.is_ok(), "email delivery failed: {result:?}");
}
