//! XML rendering and file output
//!
//! Renders `<urlset>` and `<sitemapindex>` documents and writes them under
//! the output directory, optionally gzip-compressed.

use crate::sitemap::builder::SitemapEntry;
use crate::{Result, SitemillError};
use chrono::NaiveDate;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;
use std::path::{Path, PathBuf};
use url::Url;

const XMLNS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// A sitemap file written to disk
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    /// Where the file landed on disk
    pub path: PathBuf,

    /// Public URL of the file, derived from the output base URL
    pub url: String,

    /// Run date, used as `<lastmod>` in the sitemap index
    pub lastmod: NaiveDate,
}

/// Writes sitemap and sitemap-index files for one run
#[derive(Debug)]
pub struct SitemapWriter<'a> {
    directory: &'a Path,
    url_base: Url,
    gzip: bool,
    pretty: bool,
}

impl<'a> SitemapWriter<'a> {
    /// Creates a writer targeting `directory`
    ///
    /// `url_base` is the public URL the files will be served under; a
    /// missing trailing slash is added so joins append instead of replacing
    /// the last path segment.
    pub fn new(directory: &'a Path, url_base: Url, gzip: bool, pretty: bool) -> Self {
        let mut url_base = url_base;
        if !url_base.path().ends_with('/') {
            let path = format!("{}/", url_base.path());
            url_base.set_path(&path);
        }

        Self {
            directory,
            url_base,
            gzip,
            pretty,
        }
    }

    /// Writes one chunk list as sitemap files named from `stem`
    ///
    /// A single chunk becomes `{stem}.xml`; multiple chunks become
    /// `{stem}-1.xml`, `{stem}-2.xml`, and so on. With gzip enabled the
    /// files carry a `.xml.gz` suffix instead.
    pub fn write_sitemaps(
        &self,
        stem: &str,
        chunks: &[Vec<SitemapEntry>],
        lastmod: NaiveDate,
    ) -> Result<Vec<GeneratedFile>> {
        let numbered = chunks.len() > 1;
        let mut files = Vec::with_capacity(chunks.len());

        for (i, chunk) in chunks.iter().enumerate() {
            let name = if numbered {
                format!("{}-{}", stem, i + 1)
            } else {
                stem.to_string()
            };
            let xml = render_urlset(chunk, self.pretty);
            files.push(self.write_document(&name, &xml, lastmod)?);
        }

        Ok(files)
    }

    /// Writes a `<sitemapindex>` referencing the given sitemap files
    pub fn write_index(&self, files: &[GeneratedFile], lastmod: NaiveDate) -> Result<GeneratedFile> {
        let xml = render_index(files, self.pretty);
        self.write_document("sitemap-index", &xml, lastmod)
    }

    fn write_document(&self, name: &str, xml: &str, lastmod: NaiveDate) -> Result<GeneratedFile> {
        let filename = if self.gzip {
            format!("{}.xml.gz", name)
        } else {
            format!("{}.xml", name)
        };
        let path = self.directory.join(&filename);

        if self.gzip {
            let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
            encoder
                .write_all(xml.as_bytes())
                .and_then(|_| encoder.finish())
                .and_then(|compressed| std::fs::write(&path, compressed))
                .map_err(|e| output_error(&path, e))?;
        } else {
            std::fs::write(&path, xml).map_err(|e| output_error(&path, e))?;
        }

        let url = self.url_base.join(&filename)?.to_string();
        tracing::info!("Wrote {}", path.display());

        Ok(GeneratedFile { path, url, lastmod })
    }
}

fn output_error(path: &Path, source: std::io::Error) -> SitemillError {
    SitemillError::Output {
        path: path.display().to_string(),
        source,
    }
}

/// Renders a `<urlset>` document
pub fn render_urlset(entries: &[SitemapEntry], pretty: bool) -> String {
    let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    push_line(&mut xml, pretty);
    xml.push_str(&format!(r#"<urlset xmlns="{}">"#, XMLNS));
    push_line(&mut xml, pretty);

    for entry in entries {
        if pretty {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", xml_escape(&entry.loc)));
            xml.push_str(&format!(
                "    <lastmod>{}</lastmod>\n",
                entry.lastmod.format("%Y-%m-%d")
            ));
            xml.push_str(&format!(
                "    <changefreq>{}</changefreq>\n",
                entry.changefreq
            ));
            xml.push_str(&format!("    <priority>{}</priority>\n", entry.priority));
            xml.push_str("  </url>\n");
        } else {
            xml.push_str(&format!(
                "<url><loc>{}</loc><lastmod>{}</lastmod><changefreq>{}</changefreq><priority>{}</priority></url>",
                xml_escape(&entry.loc),
                entry.lastmod.format("%Y-%m-%d"),
                entry.changefreq,
                entry.priority
            ));
        }
    }

    xml.push_str("</urlset>");
    push_line(&mut xml, pretty);
    xml
}

/// Renders a `<sitemapindex>` document
pub fn render_index(files: &[GeneratedFile], pretty: bool) -> String {
    let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    push_line(&mut xml, pretty);
    xml.push_str(&format!(r#"<sitemapindex xmlns="{}">"#, XMLNS));
    push_line(&mut xml, pretty);

    for file in files {
        if pretty {
            xml.push_str("  <sitemap>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", xml_escape(&file.url)));
            xml.push_str(&format!(
                "    <lastmod>{}</lastmod>\n",
                file.lastmod.format("%Y-%m-%d")
            ));
            xml.push_str("  </sitemap>\n");
        } else {
            xml.push_str(&format!(
                "<sitemap><loc>{}</loc><lastmod>{}</lastmod></sitemap>",
                xml_escape(&file.url),
                file.lastmod.format("%Y-%m-%d")
            ));
        }
    }

    xml.push_str("</sitemapindex>");
    push_line(&mut xml, pretty);
    xml
}

fn push_line(xml: &mut String, pretty: bool) {
    if pretty {
        xml.push('\n');
    }
}

/// Escapes the five XML special characters
pub fn xml_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
