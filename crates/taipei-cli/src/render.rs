//! Plain-text rendering of view snapshots.

use std::io::{self, Write};

use taipei_core::Attraction;
use taipei_view::{Status, ViewSnapshot};

const INTRO_PREVIEW_CHARS: usize = 80;

pub(crate) fn render_snapshot<W: Write>(out: &mut W, snap: &ViewSnapshot) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", status_line(snap))?;
    if !snap.keyword.trim().is_empty() {
        writeln!(out, "搜尋：{}（輸入 clear 重設搜尋）", snap.keyword)?;
    }

    if snap.status == Status::Error {
        writeln!(out)?;
        writeln!(out, "無法讀取景點資料")?;
        writeln!(out, "{}", snap.error_message)?;
        writeln!(out, "建議檢查網路連線，或輸入 retry 重新載入。")?;
    }

    if snap.show_empty_notice() {
        writeln!(out)?;
        writeln!(out, "No attractions found.")?;
        writeln!(out, "請嘗試其他關鍵字或稍後再試")?;
    }

    for attraction in &snap.visible {
        writeln!(out)?;
        render_card(out, attraction)?;
    }

    if snap.show_load_more() {
        writeln!(out)?;
        writeln!(out, "輸入 more 探索更多景點")?;
    }
    Ok(())
}

fn status_line(snap: &ViewSnapshot) -> String {
    if snap.status == Status::Loading {
        return "正在同步 API 數據...".to_owned();
    }
    if snap.keyword.trim().is_empty() {
        format!("當前顯示 {} 個精彩景點", snap.visible.len())
    } else {
        format!(
            "當前顯示 {} 個精彩景點（已載入 {} 個）",
            snap.visible.len(),
            snap.loaded
        )
    }
}

fn render_card<W: Write>(out: &mut W, attraction: &Attraction) -> io::Result<()> {
    match attraction.primary_category() {
        Some(category) => writeln!(out, "[{category}] {}  (ID: {})", attraction.name, attraction.id)?,
        None => writeln!(out, "{}  (ID: {})", attraction.name, attraction.id)?,
    }
    if !attraction.address.is_empty() {
        writeln!(out, "  地址：{}", attraction.address)?;
    }
    writeln!(out, "  {}", preview(attraction.introduction_or_placeholder()))?;
    writeln!(out, "  圖片：{}", attraction.cover_image())?;
    if !attraction.url.is_empty() {
        writeln!(out, "  探索詳情：{}", attraction.url)?;
    }
    Ok(())
}

/// First line of `text`, cut to [`INTRO_PREVIEW_CHARS`] characters.
fn preview(text: &str) -> String {
    let line = text.lines().map(str::trim).find(|l| !l.is_empty()).unwrap_or("");
    if line.chars().count() <= INTRO_PREVIEW_CHARS {
        return line.to_owned();
    }
    let mut cut: String = line.chars().take(INTRO_PREVIEW_CHARS).collect();
    cut.push('…');
    cut
}
