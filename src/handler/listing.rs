//! HTML directory listing

use crate::http::response::escape_html;
use std::io;
use std::path::Path;
use tokio::fs;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    /// Directory, or a symlink to one
    pub is_dir: bool,
    pub is_symlink: bool,
}

/// Read a directory, sorted case-insensitively by name
pub async fn read_entries(dir: &Path) -> io::Result<Vec<ListingEntry>> {
    let mut reader = fs::read_dir(dir).await?;
    let mut entries = Vec::new();

    while let Some(entry) = reader.next_entry().await? {
        let is_symlink = entry
            .file_type()
            .await
            .is_ok_and(|t| t.is_symlink());
        // follows symlinks
        let is_dir = fs::metadata(entry.path())
            .await
            .is_ok_and(|m| m.is_dir());

        entries.push(ListingEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir,
            is_symlink,
        });
    }

    entries.sort_by_cached_key(|e| e.name.to_lowercase());
    Ok(entries)
}

/// Render the listing page for `display_path` (already percent-decoded)
pub fn render(display_path: &str, entries: &[ListingEntry]) -> String {
    let title = format!("Directory listing for {}", escape_html(display_path));

    let mut page = String::from(
        "<!DOCTYPE HTML>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <style type=\"text/css\">\n:root {\ncolor-scheme: light dark;\n}\n</style>\n",
    );
    page.push_str(&format!("<title>{title}</title>\n</head>\n"));
    page.push_str(&format!("<body>\n<h1>{title}</h1>\n<hr>\n<ul>\n"));

    for entry in entries {
        let mut link = urlencoding::encode(&entry.name).into_owned();
        let mut display = entry.name.clone();
        if entry.is_dir {
            link.push('/');
            display.push('/');
        }
        // a link shows as "name@" even when it points at a directory
        if entry.is_symlink {
            display = format!("{}@", entry.name);
        }
        page.push_str(&format!(
            "<li><a href=\"{link}\">{}</a></li>\n",
            escape_html(&display)
        ));
    }

    page.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    page
}
