//! Interactive browsing session.
//!
//! Reads one command per line from stdin, forwards it to the coordinator,
//! and re-renders whenever the coordinator publishes a new snapshot.

use std::io::Write;

use taipei_view::{PageSource, ViewCoordinator};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render::render_snapshot;

const HELP: &str = "指令：more（載入更多）、search <關鍵字>、clear（重設搜尋）、retry（重新整理）、quit";

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Action {
    More,
    Search(String),
    Clear,
    Retry,
    Help,
    Quit,
    Unknown(String),
}

pub(crate) fn parse_action(line: &str) -> Option<Action> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (command, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(c, r)| (c, r.trim()));

    let action = match command.to_lowercase().as_str() {
        "more" | "m" => Action::More,
        "search" | "s" | "/" if rest.is_empty() => Action::Clear,
        "search" | "s" | "/" => Action::Search(rest.to_owned()),
        "clear" | "c" => Action::Clear,
        "retry" | "r" => Action::Retry,
        "help" | "h" | "?" => Action::Help,
        "quit" | "q" | "exit" => Action::Quit,
        other => Action::Unknown(other.to_owned()),
    };
    Some(action)
}

pub(crate) async fn run<S: PageSource>(
    mut coordinator: ViewCoordinator<S>,
    keyword: Option<String>,
) -> anyhow::Result<()> {
    let mut snapshots = coordinator.subscribe();
    if let Some(keyword) = keyword {
        coordinator.set_keyword(keyword);
    }

    let stdout = std::io::stdout();
    coordinator.load_initial().await;
    render_snapshot(&mut stdout.lock(), &snapshots.borrow_and_update())?;
    println!("\n{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        stdout.lock().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let Some(action) = parse_action(&line) else {
            continue;
        };

        match action {
            Action::More => {
                if !coordinator.load_more().await {
                    println!("目前沒有更多景點可以載入");
                }
            }
            Action::Search(text) => coordinator.set_keyword(text),
            Action::Clear => coordinator.set_keyword(""),
            Action::Retry => {
                if !coordinator.retry().await {
                    println!("資料仍在載入中");
                }
            }
            Action::Help => println!("{HELP}"),
            Action::Quit => break,
            Action::Unknown(command) => println!("未知指令：{command}\n{HELP}"),
        }

        if snapshots.has_changed()? {
            render_snapshot(&mut stdout.lock(), &snapshots.borrow_and_update())?;
        }
    }

    tracing::debug!(
        loaded = coordinator.attractions().len(),
        page = coordinator.page(),
        "browse session ended"
    );
    Ok(())
}
