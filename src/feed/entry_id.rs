use crate::feed::ReplyTo;

/// Marker found in the id of every post and comment of a Blogger export.
/// Settings, layout and template entries don't carry it.
pub const POST_SCOPE_MARKER: &str = ".post-";

pub fn is_post_scoped(entry_id: &str) -> bool {
    entry_id.contains(POST_SCOPE_MARKER)
}

/// `tag:blogger.com,1999:blog-1.post-555` -> `555`
pub fn post_id_from_entry_id(entry_id: &str) -> &str {
    entry_id.rsplit('-').next().unwrap_or(entry_id)
}

/// `http://www.blogger.com/feeds/1/posts/default/555` -> `555`
pub fn post_id_from_source(source: &str) -> &str {
    source.trim_end_matches('/').rsplit('/').next().unwrap_or(source)
}

/// Id of the post a comment replies to. The `source` url is preferred,
/// the `ref` entry id is used when an export leaves `source` out.
pub fn reply_target(reply_to: &ReplyTo) -> Option<&str> {
    if let Some(ref source) = reply_to.source {
        return Some(post_id_from_source(source));
    }
    reply_to.reference.as_deref().map(post_id_from_entry_id)
}
