use std::collections::HashMap;
use std::fmt::Write;

use spdlog::{error, info, warn};

use crate::config::CommentMode;
use crate::content::markdown::MarkdownConverter;
use crate::error::{Error, Result};
use crate::feed::entry_id::reply_target;
use crate::feed::{Author, FeedEntry};
use crate::post::{Post, PostId};
use crate::text_utils::{format_readable_date, parse_timestamp};
use crate::writer::{write_file, WriteMode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: String,
    pub post_id: PostId,
    pub published: String,
    pub title: String,
    pub body: String,
    pub author: Author,
}

impl Comment {
    pub fn from_entry(entry: &FeedEntry, converter: &MarkdownConverter) -> Comment {
        let post_id = entry.in_reply_to.as_ref()
            .and_then(reply_target)
            .unwrap_or("");

        Comment {
            id: entry.id.clone(),
            post_id: PostId(post_id.to_string()),
            published: entry.published.clone(),
            title: convert_field(converter, &entry.id, entry.title.as_deref()),
            body: convert_field(converter, &entry.id, entry.content.as_deref()),
            author: entry.author.clone().unwrap_or_default(),
        }
    }

    /// ```text
    /// #### Nice post
    /// [Bob](http://bob.example.com "bob@example.com") - <time datetime="2020-01-07T12:00:00Z">Jan 7, 2020</time>
    ///
    /// Thanks **a lot**!
    /// <hr />
    /// ```
    pub fn render(&self) -> String {
        let readable = match parse_timestamp(&self.published) {
            Ok(date) => format_readable_date(&date),
            Err(_) => self.published.clone(),
        };

        let mut buf = String::new();
        let _ = writeln!(&mut buf, "#### {}", self.title);
        let _ = writeln!(&mut buf, "[{}]({} \"{}\") - <time datetime=\"{}\">{}</time>",
                         self.author.name, self.author.url, self.author.email, self.published, readable);
        let _ = writeln!(&mut buf);
        let _ = writeln!(&mut buf, "{}", self.body);
        let _ = writeln!(&mut buf, "<hr />");
        buf
    }
}

fn convert_field(converter: &MarkdownConverter, comment_id: &str, html: Option<&str>) -> String {
    let Some(html) = html else {
        return String::new();
    };

    match converter.convert(html) {
        Ok(markdown) => markdown,
        Err(e) => {
            error!("Could not convert comment {} to markdown, keeping the html - {}", comment_id, e);
            html.to_string()
        }
    }
}

/// Posts of the run by id, in the order they were first seen
#[derive(Default)]
pub struct PostMap {
    posts: HashMap<PostId, Post>,
    order: Vec<PostId>,
}

impl PostMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// A post with an id already in the map replaces the previous one and keeps its place
    pub fn insert(&mut self, post: Post) -> Option<Post> {
        let id = post.id.clone();
        let previous = self.posts.insert(id.clone(), post);
        if previous.is_none() {
            self.order.push(id);
        }
        previous
    }

    pub fn get(&self, id: &PostId) -> Option<&Post> {
        self.posts.get(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item=&Post> {
        self.order.iter().filter_map(|id| self.posts.get(id))
    }

    pub fn attach(&mut self, comment: Comment) -> Result<()> {
        match self.posts.get_mut(&comment.post_id) {
            Some(post) => {
                post.comments.push(comment);
                Ok(())
            }
            None => Err(Error::PostNotFound {
                post_id: comment.post_id.0,
                comment_id: comment.id,
            }),
        }
    }
}

/// Every comment of a post, rendered and joined in arrival order
pub fn render_comments(comments: &[Comment]) -> String {
    comments.iter().map(Comment::render).collect()
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EmitReport {
    pub written: usize,
    pub failed: usize,
}

/// Writes the comments of every post that has any, following the comment mode
pub fn emit_comments(posts: &PostMap, mode: CommentMode) -> EmitReport {
    let mut report = EmitReport::default();
    if mode == CommentMode::Drop {
        return report;
    }

    for post in posts.iter().filter(|post| !post.comments.is_empty()) {
        let block = render_comments(&post.comments);

        let res = match mode {
            CommentMode::Merge => {
                write_file(&post.file_name, &format!("\n---\n### Comments:\n{}", block), WriteMode::Append)
            }
            _ => {
                write_file(&post.comments_file_name, &format!("{}\n{}", post.header, block), WriteMode::Overwrite)
            }
        };

        match res {
            Ok(()) => report.written += 1,
            Err(e) => {
                warn!("Comments of post {} were not written: {}", post.id, e);
                report.failed += 1;
            }
        }
    }

    info!("Comments written for {} posts", report.written);
    report
}
