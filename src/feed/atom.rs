use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::feed::{Author, FeedEntry, Link, ReplyTo};

/* Example of entry, as exported by Blogger
<feed xmlns='http://www.w3.org/2005/Atom' xmlns:app='http://purl.org/atom/app#' xmlns:thr='http://purl.org/syndication/thread/1.0'>
  <entry>
    <id>tag:blogger.com,1999:blog-1.post-555</id>
    <published>2020-01-05T10:00:00.000-08:00</published>
    <updated>2020-01-06T11:00:00.000-08:00</updated>
    <app:control><app:draft>yes</app:draft></app:control>
    <category scheme='http://www.blogger.com/atom/ns#' term='rust'/>
    <title type='text'>Hello</title>
    <content type='html'>&lt;p&gt;Body&lt;/p&gt;</content>
    <link rel='alternate' type='text/html' href='http://example.com/2020/01/hello.html' title='Hello'/>
    <author><name>Someone</name><uri>http://example.com</uri><email>noreply@blogger.com</email></author>
    <thr:in-reply-to href='...' ref='tag:blogger.com,1999:blog-1.post-554' source='http://www.blogger.com/feeds/1/posts/default/554' type='text/html'/>
  </entry>
</feed>
*/

/// Reads every `feed/entry` of an Atom export.
/// Elements are matched by local name, so the `app:` and `thr:` prefixes may vary.
/// Text of markup nested in a field (xhtml content) is folded into the field text.
pub fn parse_feed(xml: &str) -> Result<Vec<FeedEntry>, String> {
    let mut reader = Reader::from_str(xml);

    let mut path: Vec<String> = vec![];
    let mut entries: Vec<FeedEntry> = vec![];
    let mut entry: Option<FeedEntry> = None;
    let mut author: Option<Author> = None;
    let mut text = String::new();
    let mut saw_feed = false;

    loop {
        let event = reader.read_event()
            .map_err(|e| format!("{} at position {}", e, reader.buffer_position()))?;

        match event {
            Event::Start(e) => {
                let name = local_name(&e);
                let parent = path.last().map(|p| p.as_str());

                match (parent, name.as_str()) {
                    (None, "feed") => saw_feed = true,
                    (Some("feed"), "entry") => entry = Some(FeedEntry::default()),
                    (Some("entry"), "author") => author = Some(Author::default()),
                    _ => {}
                }

                if let Some(ref mut entry) = entry {
                    if parent == Some("entry") {
                        read_entry_attributes(entry, &name, &e)?;
                    }
                }

                if matches!(parent, Some("entry") | Some("author") | Some("control")) {
                    text.clear();
                }
                path.push(name);
            }
            Event::Empty(e) => {
                let name = local_name(&e);
                let parent = path.last().map(|p| p.as_str());
                if let Some(ref mut entry) = entry {
                    if parent == Some("entry") {
                        read_entry_attributes(entry, &name, &e)?;
                    }
                }
            }
            Event::Text(t) => {
                let unescaped = t.unescape()
                    .map_err(|e| format!("{} at position {}", e, reader.buffer_position()))?;
                text.push_str(&unescaped);
            }
            Event::CData(c) => {
                text.push_str(&String::from_utf8_lossy(&c.into_inner()));
            }
            Event::End(_) => {
                let Some(name) = path.pop() else {
                    return Err(format!("Unexpected closing tag at position {}", reader.buffer_position()));
                };
                let parent = path.last().map(|p| p.as_str());

                match (parent, name.as_str()) {
                    (Some("feed"), "entry") => {
                        if let Some(done) = entry.take() {
                            entries.push(done);
                        }
                    }
                    (Some("entry"), field) => {
                        if let Some(ref mut entry) = entry {
                            match field {
                                "id" => entry.id = text.trim().to_string(),
                                "published" => entry.published = text.trim().to_string(),
                                "updated" => entry.updated = text.trim().to_string(),
                                "title" => entry.title = Some(text.clone()),
                                "content" => entry.content = Some(text.clone()),
                                "author" => entry.author = author.take(),
                                _ => {}
                            }
                        }
                    }
                    (Some("author"), field) => {
                        if let Some(ref mut author) = author {
                            match field {
                                "name" => author.name = text.trim().to_string(),
                                "email" => author.email = text.trim().to_string(),
                                "uri" => author.url = text.trim().to_string(),
                                _ => {}
                            }
                        }
                    }
                    (Some("control"), "draft") => {
                        if let Some(ref mut entry) = entry {
                            entry.draft = Some(text.trim().to_string());
                        }
                    }
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !path.is_empty() {
        return Err(format!("Unexpected end of file, <{}> is not closed", path.join("/")));
    }

    if !saw_feed {
        return Err("No <feed> root element found".to_string());
    }

    Ok(entries)
}

fn local_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

fn read_entry_attributes(entry: &mut FeedEntry, name: &str, e: &BytesStart) -> Result<(), String> {
    match name {
        "category" => {
            if let Some(term) = attribute(e, "term")? {
                entry.categories.push(term);
            }
        }
        "link" => {
            entry.links.push(Link {
                rel: attribute(e, "rel")?,
                link_type: attribute(e, "type")?,
                href: attribute(e, "href")?,
            });
        }
        "in-reply-to" => {
            entry.in_reply_to = Some(ReplyTo {
                source: attribute(e, "source")?,
                reference: attribute(e, "ref")?,
                href: attribute(e, "href")?,
            });
        }
        _ => {}
    }
    Ok(())
}

fn attribute(e: &BytesStart, key: &str) -> Result<Option<String>, String> {
    for attr in e.attributes() {
        let attr = attr.map_err(|err| err.to_string())?;
        if attr.key.as_ref() == key.as_bytes() {
            let value = attr.unescape_value().map_err(|err| err.to_string())?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}
