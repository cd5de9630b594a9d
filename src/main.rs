use anyhow::Context;
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::runtime::Builder;

use studentdesk::backend::client::BackendClient;
use studentdesk::chat::controller::ChatWidget;
use studentdesk::chat::dto::Role;
use studentdesk::man::settings::Settings;

const QUICK_QUESTIONS: &[&str] = &[
    "What courses do you offer?",
    "What are the fees?",
    "What are the college timings?",
    "How do I apply for admission?",
];

fn main() {
    env_logger::init();

    let runtime = Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("studentdesk")
        .enable_io()
        .enable_time()
        .build()
        .expect("Building the runtime failed");

    if let Err(e) = runtime.block_on(run()) {
        log::error!("{:?}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let settings = Settings::from_env();
    let client = BackendClient::new(&settings)
        .map_err(|e| anyhow::anyhow!("{:?}", e))
        .context("Building the backend client failed")?;
    let mut widget = ChatWidget::new(client);

    println!(
        "{} {}",
        "Connected to".bright_green(),
        settings.base_url.blue()
    );
    println!("Type a message and press Enter. Commands: /q <n> for a quick question, /quit to exit.");
    for (i, q) in QUICK_QUESTIONS.iter().enumerate() {
        println!("  {} {}", format!("/q {}", i + 1).bright_yellow(), q);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut printed = 0usize;
    loop {
        let line = match lines.next_line().await.context("Reading input failed")? {
            Some(l) => l,
            None => break,
        };
        let trimmed = line.trim();
        if trimmed == "/quit" {
            break;
        }
        if let Some(arg) = trimmed.strip_prefix("/q ") {
            match arg.trim().parse::<usize>() {
                Ok(n) if (1..=QUICK_QUESTIONS.len()).contains(&n) => {
                    widget.quick_question(QUICK_QUESTIONS[n - 1]).await;
                }
                _ => {
                    println!("Pick a quick question between 1 and {}", QUICK_QUESTIONS.len());
                    continue;
                }
            }
        } else {
            widget.submit_user_message(trimmed).await;
        }
        for msg in &widget.transcript()[printed..] {
            let who = match msg.role {
                Role::User => "you".bright_yellow(),
                Role::Bot => "bot".bright_green(),
            };
            println!("[{}] {}: {}", msg.timestamp, who, msg.text);
        }
        printed = widget.transcript().len();
    }
    Ok(())
}
