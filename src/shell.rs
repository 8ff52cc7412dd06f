use crate::api::Backend;
use crate::app::App;
use crate::ui::event::Event;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Reads one event per line, dispatches it and writes the re-rendered app.
/// Stops at EOF or on `quit`/`exit`.
pub async fn run_shell<B, R, W>(app: &App<B>, reader: R, mut writer: W) -> anyhow::Result<()>
where
    B: Backend,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "quit" | "exit") {
            break;
        }

        let Some(event) = Event::parse(line) else {
            tracing::warn!(input = line, "Unrecognized event");
            continue;
        };
        app.dispatch(event).await;

        let mut html = app.render();
        html.push('\n');
        writer.write_all(html.as_bytes()).await?;
        writer.flush().await?;
    }
    Ok(())
}
