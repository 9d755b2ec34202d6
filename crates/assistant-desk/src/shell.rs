// Terminal presentation: assistant table, notifications, and query dispatch.

use assistant_desk_client::{
    AssistantRecord, AssistantRegistry, DeskError, Notification, QueryPipeline, Severity,
};
use std::future::Future;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

const DESCRIPTION_WIDTH: usize = 48;

pub enum QueryOutcome {
    Answered(String),
    Failed(DeskError),
    Interrupted,
}

/// Run the query on its own task so Ctrl-C can abandon it without taking
/// the whole shell down.
pub async fn dispatch_query(
    pipeline: &QueryPipeline,
    assistant_id: String,
    text: String,
) -> anyhow::Result<QueryOutcome> {
    let pipeline = pipeline.clone();
    let handle = tokio::spawn(async move { pipeline.query(&assistant_id, &text).await });
    let abort = handle.abort_handle();

    tokio::select! {
        joined = handle => Ok(match joined? {
            Ok(answer) => QueryOutcome::Answered(answer),
            Err(err) => QueryOutcome::Failed(err),
        }),
        _ = tokio::signal::ctrl_c() => {
            abort.abort();
            tracing::info!("Query abandoned by user");
            Ok(QueryOutcome::Interrupted)
        }
    }
}

pub fn format_assistant_table(assistants: &[AssistantRecord]) -> String {
    let rows: Vec<[String; 5]> = assistants
        .iter()
        .enumerate()
        .map(|(i, a)| {
            [
                (i + 1).to_string(),
                a.name.clone(),
                truncate(&a.description, DESCRIPTION_WIDTH),
                a.model.clone(),
                a.id.clone(),
            ]
        })
        .collect();

    let header = ["#", "Name", "Description", "Model", "Id"].map(String::from);
    let mut widths = header.clone().map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for row in std::iter::once(&header).chain(rows.iter()) {
        let line: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }
    out
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

pub fn print_assistants(registry: &AssistantRegistry) {
    if registry.is_empty() {
        println!("No assistants found for this account.");
        return;
    }
    print!("{}", format_assistant_table(registry.all()));
}

pub fn print_notification(notification: &Notification) {
    let level = match notification.severity {
        Severity::Warning => "warning",
        Severity::Error => "error",
    };
    eprintln!("[{}] {}: {}", level, notification.title, notification.body);
}

/// Select-then-ask loop. Empty selection or end of input quits.
pub async fn interactive(registry: &AssistantRegistry, pipeline: &QueryPipeline) -> anyhow::Result<()> {
    print_assistants(registry);
    if registry.is_empty() {
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        prompt("\nAssistant (#, id or name; empty to quit): ")?;
        let Some(selector) = read_line_or_interrupt(&mut lines, ctrl_c()).await? else {
            break;
        };
        if selector.trim().is_empty() {
            break;
        }

        let assistant = match registry.select(&selector) {
            Ok(assistant) => assistant,
            Err(err) => {
                print_notification(&err.notification());
                continue;
            }
        };

        prompt(&format!("Ask {}: ", display_name(assistant)))?;
        let Some(question) = read_line_or_interrupt(&mut lines, ctrl_c()).await? else {
            break;
        };
        if question.trim().is_empty() {
            continue;
        }

        match dispatch_query(pipeline, assistant.id.clone(), question).await? {
            QueryOutcome::Answered(answer) => println!("\n{}", answer),
            QueryOutcome::Failed(err) => print_notification(&err.notification()),
            QueryOutcome::Interrupted => println!("\nQuery abandoned."),
        }
    }

    Ok(())
}

/// Next input line, or `None` at end of input or once `interrupt` fires.
///
/// Once a Ctrl-C listener has been installed the default SIGINT exit no
/// longer applies, so every blocking prompt has to watch for it itself.
async fn read_line_or_interrupt<R, I>(
    lines: &mut Lines<R>,
    interrupt: I,
) -> std::io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
    I: Future<Output = ()>,
{
    tokio::select! {
        line = lines.next_line() => line,
        _ = interrupt => {
            tracing::info!("Prompt interrupted by user");
            println!();
            Ok(None)
        }
    }
}

async fn ctrl_c() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "Ctrl-C listener unavailable");
        std::future::pending::<()>().await;
    }
}

pub fn display_name(assistant: &AssistantRecord) -> &str {
    if assistant.name.is_empty() {
        &assistant.id
    } else {
        &assistant.name
    }
}

fn prompt(text: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()
}
