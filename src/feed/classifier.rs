use crate::feed::entry_id::is_post_scoped;
use crate::feed::FeedEntry;

pub struct Classified<'a> {
    pub posts: Vec<&'a FeedEntry>,
    pub comments: Vec<&'a FeedEntry>,
    /// Entries outside of the blog content (settings, templates, ...)
    pub skipped: usize,
}

/// Splits the export in posts and comments, keeping the order of the file
pub fn classify(entries: &[FeedEntry]) -> Classified<'_> {
    let mut classified = Classified {
        posts: vec![],
        comments: vec![],
        skipped: 0,
    };

    for entry in entries {
        if !is_post_scoped(&entry.id) {
            classified.skipped += 1;
        } else if entry.is_reply() {
            classified.comments.push(entry);
        } else {
            classified.posts.push(entry);
        }
    }

    classified
}
