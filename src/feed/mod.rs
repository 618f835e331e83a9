pub mod atom;
pub mod classifier;
pub mod entry_id;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub email: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Link {
    pub rel: Option<String>,
    pub link_type: Option<String>,
    pub href: Option<String>,
}

/// `thr:in-reply-to` of a comment entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplyTo {
    pub source: Option<String>,
    pub reference: Option<String>,
    pub href: Option<String>,
}

/// One `<entry>` of the export, as found in the file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedEntry {
    pub id: String,
    pub published: String,
    pub updated: String,
    pub title: Option<String>,
    pub content: Option<String>,
    pub categories: Vec<String>,
    pub author: Option<Author>,
    pub links: Vec<Link>,
    pub in_reply_to: Option<ReplyTo>,
    /// Text of `app:control/app:draft`, when present
    pub draft: Option<String>,
}

impl FeedEntry {
    pub fn is_reply(&self) -> bool {
        self.in_reply_to.is_some()
    }

    pub fn is_draft(&self) -> bool {
        self.draft.as_deref()
            .map(|d| d.trim().eq_ignore_ascii_case("yes"))
            .unwrap_or(false)
    }

    /// First `alternate` link served as `text/html`, or an empty string
    pub fn html_url(&self) -> &str {
        self.links.iter()
            .find(|link| link.rel.as_deref() == Some("alternate") && link.link_type.as_deref() == Some("text/html"))
            .and_then(|link| link.href.as_deref())
            .unwrap_or("")
    }
}
