use std::fmt::{self, Display, Formatter, Write};
use std::path::{Path, PathBuf};

use chrono::Datelike;
use spdlog::{debug, error, warn};

use crate::comments::Comment;
use crate::config::Conversion;
use crate::content::markdown::MarkdownConverter;
use crate::feed::entry_id::post_id_from_entry_id;
use crate::feed::{Author, FeedEntry};
use crate::text_utils::{file_name_from_title, parse_timestamp, url_path};

/// Categories in this namespace are Blogger's own bookkeeping (`kind#post`), not tags
const INTERNAL_TAXONOMY: &str = "http://schemas.google";

#[derive(Debug, Clone, Eq, Hash, PartialEq)]
pub struct PostId(pub String);

impl Display for PostId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub struct Post {
    pub id: PostId,
    /// Title escaped to live inside a double-quoted front matter value
    pub title: String,
    pub published: String,
    pub updated: String,
    pub draft: bool,
    pub url: String,
    pub alias: String,
    pub tags: Vec<String>,
    pub author: Author,
    pub body: String,
    pub file_name: PathBuf,
    pub comments_file_name: PathBuf,
    /// Front matter, without the `+++` delimiters
    pub header: String,
    pub comments: Vec<Comment>,
}

impl Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "id={}, date={}, author={}, draft={}\ntitle={}\nfile={}",
               self.id,
               self.published,
               self.author.name,
               self.draft,
               self.title,
               self.file_name.display()
        )
    }
}

impl Post {
    /// Content of the post file: front matter, a blank line and the body
    pub fn file_content(&self) -> String {
        format!("+++\n{}+++\n\n{}\n", self.header, self.body)
    }
}

pub fn escape_quotes(text: &str) -> String {
    text.replace('"', "\\\"")
}

pub struct PostBuilder<'a> {
    pub conversion: &'a Conversion,
    pub output_dir: &'a Path,
    pub converter: &'a MarkdownConverter,
}

impl<'a> PostBuilder<'a> {
    pub fn build(&self, entry: &FeedEntry) -> Post {
        let title = escape_quotes(entry.title.as_deref().unwrap_or(""));
        let id = PostId(post_id_from_entry_id(&entry.id).to_string());
        let draft = entry.is_draft();

        let url = entry.html_url().to_string();
        let alias = url_path(&url);

        let (file_name, comments_file_name) = self.file_names(&id, &title, &entry.published);

        let body = match entry.content {
            Some(ref html) => self.convert_body(&id, html),
            None => String::new(),
        };

        let tags = extract_tags(&entry.categories);
        let author = entry.author.clone().unwrap_or_default();

        let header = render_header(&title, &entry.published, &entry.updated, draft,
                                   self.conversion.import_flag, &alias, &tags);
        debug!("{}", header);

        Post {
            id,
            title,
            published: entry.published.clone(),
            updated: entry.updated.clone(),
            draft,
            url,
            alias,
            tags,
            author,
            body,
            file_name,
            comments_file_name,
            header,
            comments: vec![],
        }
    }

    fn convert_body(&self, id: &PostId, html: &str) -> String {
        match self.converter.convert(html) {
            Ok(markdown) => markdown,
            Err(e) => {
                error!("Could not convert the content of post {} to markdown, keeping the html - {}", id, e);
                html.to_string()
            }
        }
    }

    fn file_names(&self, id: &PostId, title: &str, published: &str) -> (PathBuf, PathBuf) {
        let mut dir = self.output_dir.to_path_buf();
        if self.conversion.date_directories {
            match parse_timestamp(published) {
                Ok(date) => dir = dir.join(date.year().to_string()).join(date.month().to_string()),
                Err(e) => warn!("Post {} is not placed in a date directory: {}", id, e),
            }
        }

        let mut slug = file_name_from_title(title);
        if slug.is_empty() {
            slug = format!("post-{}", id);
        }

        let file_name = dir.join(format!("{}.md", slug));
        let comments_file_name = dir.join(format!("{}-comments.md", slug));
        (file_name, comments_file_name)
    }
}

fn extract_tags(categories: &[String]) -> Vec<String> {
    categories.iter()
        .filter(|term| !term.is_empty() && !term.contains(INTERNAL_TAXONOMY))
        .cloned()
        .collect()
}

fn render_header(title: &str, published: &str, updated: &str, draft: bool,
                 import_flag: bool, alias: &str, tags: &[String]) -> String {
    let tags = tags.iter()
        .map(|tag| format!("\"{}\"", escape_quotes(tag)))
        .collect::<Vec<String>>()
        .join(",");

    let mut buf = String::new();

    let _ = writeln!(&mut buf, "title = \"{}\"", title);
    let _ = writeln!(&mut buf, "date = {}", published);
    let _ = writeln!(&mut buf, "updated = {}", updated);
    let _ = writeln!(&mut buf, "draft = {}", draft);
    if import_flag {
        let _ = writeln!(&mut buf, "blogImport = true");
    }
    let _ = writeln!(&mut buf, "url = '{}'", alias);
    let _ = writeln!(&mut buf, "tags = [{}]", tags);
    buf
}
