//! Filesystem loader: reads the component file on every load.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use pulldown_cmark::{Options, Parser, html};

use super::{ComponentLoader, Renderable};
use crate::component::ComponentKind;

/// Loads components from a directory.
///
/// Nothing is cached: edits show up on the next request.
#[derive(Debug, Clone)]
pub struct FsLoader {
    dir: PathBuf,
}

impl FsLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ComponentLoader for FsLoader {
    fn load(&self, source_file: &str) -> Result<Box<dyn Renderable>> {
        let kind = Path::new(source_file)
            .extension()
            .and_then(|e| e.to_str())
            .and_then(ComponentKind::from_extension)
            .ok_or_else(|| anyhow!("unsupported component file `{source_file}`"))?;

        let path = self.dir.join(source_file);
        let source = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        Ok(Box::new(SourceComponent { kind, source }))
    }
}

struct SourceComponent {
    kind: ComponentKind,
    source: String,
}

impl Renderable for SourceComponent {
    fn render(&self) -> Result<String> {
        Ok(match self.kind {
            ComponentKind::Markdown => markdown_to_html(&self.source),
            ComponentKind::Html => self.source.clone(),
        })
    }
}

fn markdown_to_html(source: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;

    let parser = Parser::new_ext(source, options);
    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn render(loader: &FsLoader, file: &str) -> Result<String> {
        loader.load(file)?.render()
    }

    #[test]
    fn test_markdown() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("card.md"),
            "# Title\n\n| a | b |\n|---|---|\n| 1 | 2 |\n\n~~old~~",
        )
        .unwrap();

        let html = render(&FsLoader::new(tmp.path()), "card.md").unwrap();
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>old</del>"));
    }

    #[test]
    fn test_html_verbatim() {
        let tmp = TempDir::new().unwrap();
        let source = "<section class=\"sheet\"><b>x</b></section>\n";
        fs::write(tmp.path().join("sheet.html"), source).unwrap();

        let html = render(&FsLoader::new(tmp.path()), "sheet.html").unwrap();
        assert_eq!(html, source);
    }

    #[test]
    fn test_reads_on_every_load() {
        let tmp = TempDir::new().unwrap();
        let loader = FsLoader::new(tmp.path());
        fs::write(tmp.path().join("a.html"), "one").unwrap();
        assert_eq!(render(&loader, "a.html").unwrap(), "one");
        fs::write(tmp.path().join("a.html"), "two").unwrap();
        assert_eq!(render(&loader, "a.html").unwrap(), "two");
    }

    #[test]
    fn test_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = render(&FsLoader::new(tmp.path()), "gone.md").unwrap_err();
        assert!(format!("{err:#}").contains("gone.md"));
    }

    #[test]
    fn test_invalid_utf8_content_fails_render() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("binary.html"), [0x3c, 0x70, 0xff, 0xfe, 0x3e]).unwrap();

        let loader = FsLoader::new(tmp.path());
        match crate::component::render(&loader, "binary.html") {
            crate::component::RenderResult::Failed {
                source_file,
                message,
            } => {
                assert_eq!(source_file, "binary.html");
                assert!(message.contains("binary.html"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_extension() {
        let tmp = TempDir::new().unwrap();
        let err = render(&FsLoader::new(tmp.path()), "widget.tsx").unwrap_err();
        assert!(err.to_string().contains("unsupported"));
    }
}
