use std::fs;
use std::path::Path;

use spdlog::{debug, info, warn};

use crate::comments::{emit_comments, Comment, PostMap};
use crate::config::{CommentMode, Config, OrphanPolicy};
use crate::content::markdown::MarkdownConverter;
use crate::error::{Error, Result};
use crate::feed::atom::parse_feed;
use crate::feed::classifier::classify;
use crate::feed::FeedEntry;
use crate::post::PostBuilder;
use crate::writer::{write_file, WriteMode};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportStats {
    pub entries: usize,
    pub skipped_entries: usize,
    pub posts: usize,
    pub comments: usize,
    pub orphan_comments: usize,
    pub comment_files: usize,
    pub write_failures: usize,
}

/// One conversion run of an export file into a markdown tree
pub struct Importer<'a> {
    config: &'a Config,
    converter: MarkdownConverter,
}

impl<'a> Importer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Importer {
            config,
            converter: MarkdownConverter::new(),
        }
    }

    pub fn run(&self) -> Result<ImportStats> {
        let input = &self.config.input_file;
        let xml = fs::read_to_string(input).map_err(|e| Error::Read {
            path: input.clone(),
            source: e,
        })?;

        self.prepare_output_dir()?;
        self.import_str(&xml)
    }

    /// Converts an export already in memory. The output directory is created as files are written.
    pub fn import_str(&self, xml: &str) -> Result<ImportStats> {
        let entries = parse_feed(xml).map_err(|message| Error::Parse {
            path: self.config.input_file.clone(),
            message,
        })?;
        self.import_entries(&entries)
    }

    pub fn import_entries(&self, entries: &[FeedEntry]) -> Result<ImportStats> {
        let conversion = &self.config.conversion;
        let classified = classify(entries);

        info!("Total no. of entries found : {}", entries.len());
        info!("Content-posts {}", classified.posts.len());
        info!("Content-Comments {}", classified.comments.len());

        let mut stats = ImportStats {
            entries: entries.len(),
            skipped_entries: classified.skipped,
            ..Default::default()
        };

        let builder = PostBuilder {
            conversion,
            output_dir: &self.config.output_dir,
            converter: &self.converter,
        };

        let mut posts = PostMap::new();
        for entry in &classified.posts {
            let post = builder.build(entry);
            debug!("{}", post);

            if write_file(&post.file_name, &post.file_content(), WriteMode::Overwrite).is_err() {
                stats.write_failures += 1;
            }

            if let Some(previous) = posts.insert(post) {
                warn!("Post id {} found more than once, keeping the last one ({})", previous.id, previous.title);
            }
        }
        stats.posts = posts.len();

        if conversion.comments != CommentMode::Drop {
            for entry in &classified.comments {
                let comment = Comment::from_entry(entry, &self.converter);
                match posts.attach(comment) {
                    Ok(()) => stats.comments += 1,
                    Err(e @ Error::PostNotFound { .. }) if conversion.orphans == OrphanPolicy::Skip => {
                        warn!("Skipping comment: {}", e);
                        stats.orphan_comments += 1;
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        let report = emit_comments(&posts, conversion.comments);
        stats.comment_files = report.written;
        stats.write_failures += report.failed;

        info!("Done");
        Ok(stats)
    }

    fn prepare_output_dir(&self) -> Result<()> {
        let output_dir: &Path = &self.config.output_dir;
        if output_dir.exists() {
            warn!("Given output directory \"{}\" already exists. Files will be overwritten.", output_dir.display());
            return Ok(());
        }

        fs::create_dir_all(output_dir).map_err(|e| Error::Write {
            path: output_dir.to_path_buf(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tempfile::{tempdir, TempDir};

    use crate::config::Conversion;
    use crate::test_data::FEED_DATA;

    use super::*;

    fn config(dir: &TempDir, conversion: Conversion) -> Config {
        let mut config = Config::new(dir.path().join("blog.xml"), dir.path().join("out"));
        config.conversion = conversion;
        config
    }

    fn files_in(dir: &Path) -> Vec<PathBuf> {
        let mut files = vec![];
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                files.extend(files_in(&path));
            } else {
                files.push(path);
            }
        }
        files.sort();
        files
    }

    #[test]
    fn test_run_split() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("blog.xml"), FEED_DATA).unwrap();
        let config = config(&dir, Conversion::default());

        let stats = Importer::new(&config).run().unwrap();
        assert_eq!(stats, ImportStats {
            entries: 6,
            skipped_entries: 1,
            posts: 2,
            comments: 3,
            orphan_comments: 0,
            comment_files: 2,
            write_failures: 0,
        });

        let out = dir.path().join("out");
        assert_eq!(files_in(&out), vec![
            out.join("draft-notes-on-pre-blocks-comments.md"),
            out.join("draft-notes-on-pre-blocks.md"),
            out.join("hello-world-comments.md"),
            out.join("hello-world.md"),
        ]);

        let post = fs::read_to_string(out.join("hello-world.md")).unwrap();
        assert!(post.contains("title = \"Hello \\\"World\\\"\"\n"));
        assert!(post.contains("url = '/2020/01/hello.html'\n"));
        assert!(post.ends_with("+++\n\n```js\nconsole.log(1);\n```\n"));
        assert!(!post.contains("### Comments:"));

        let comments = fs::read_to_string(out.join("hello-world-comments.md")).unwrap();
        assert!(comments.starts_with("title = \"Hello \\\"World\\\"\"\n"));
        assert_eq!(comments.matches("<hr />").count(), 2);
        assert!(comments.find("#### Nice post").unwrap() < comments.find("#### Follow up").unwrap());
    }

    #[test]
    fn test_run_merge() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("blog.xml"), FEED_DATA).unwrap();
        let config = config(&dir, Conversion {
            comments: CommentMode::Merge,
            ..Default::default()
        });

        let stats = Importer::new(&config).run().unwrap();
        assert_eq!(stats.comment_files, 2);

        let out = dir.path().join("out");
        assert_eq!(files_in(&out), vec![
            out.join("draft-notes-on-pre-blocks.md"),
            out.join("hello-world.md"),
        ]);

        let post = fs::read_to_string(out.join("hello-world.md")).unwrap();
        assert!(post.starts_with("+++\ntitle = "));
        assert!(post.contains("```js\nconsole.log(1);\n```\n\n---\n### Comments:\n#### Nice post\n"));
        assert!(post.contains("#### Follow up\n[Carol](http://carol.example.com \"carol@example.com\") - <time datetime=\"2020-01-08T12:00:00Z\">Jan 8, 2020</time>\n"));

        let draft = fs::read_to_string(out.join("draft-notes-on-pre-blocks.md")).unwrap();
        assert!(draft.contains("### Comments:\n#### \n[Anonymous]"));
    }

    #[test]
    fn test_run_drop() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("blog.xml"), FEED_DATA).unwrap();
        let config = config(&dir, Conversion {
            comments: CommentMode::Drop,
            ..Default::default()
        });

        let stats = Importer::new(&config).run().unwrap();
        assert_eq!(stats.comments, 0);
        assert_eq!(stats.comment_files, 0);

        let out = dir.path().join("out");
        assert_eq!(files_in(&out), vec![
            out.join("draft-notes-on-pre-blocks.md"),
            out.join("hello-world.md"),
        ]);
        let post = fs::read_to_string(out.join("hello-world.md")).unwrap();
        assert!(!post.contains("Comments"));
    }

    #[test]
    fn test_run_date_directories() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("blog.xml"), FEED_DATA).unwrap();
        let config = config(&dir, Conversion {
            date_directories: true,
            import_flag: true,
            ..Default::default()
        });

        Importer::new(&config).run().unwrap();

        let out = dir.path().join("out");
        let post = fs::read_to_string(out.join("2020").join("1").join("hello-world.md")).unwrap();
        assert!(post.contains("draft = false\nblogImport = true\nurl = "));
        assert!(out.join("2020").join("1").join("hello-world-comments.md").exists());
        assert!(out.join("2021").join("11").join("draft-notes-on-pre-blocks.md").exists());
    }

    #[test]
    fn test_write_failure_does_not_stop_the_run() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("blog.xml"), FEED_DATA).unwrap();
        let out = dir.path().join("out");
        // A directory where the post file should go
        fs::create_dir_all(out.join("hello-world.md")).unwrap();
        let config = config(&dir, Conversion::default());

        let stats = Importer::new(&config).run().unwrap();
        assert_eq!(stats.write_failures, 1);
        assert_eq!(stats.posts, 2);
        assert_eq!(stats.comments, 3);
        assert_eq!(stats.comment_files, 2);

        assert!(out.join("hello-world.md").is_dir());
        assert!(fs::read_to_string(out.join("hello-world-comments.md")).unwrap().contains("#### Nice post"));
        assert!(fs::read_to_string(out.join("draft-notes-on-pre-blocks.md")).unwrap().starts_with("+++
"));
        assert!(out.join("draft-notes-on-pre-blocks-comments.md").exists());
    }

    fn orphan_feed() -> String {
        FEED_DATA.replace("feeds/1/posts/default/777", "feeds/1/posts/default/404")
    }

    #[test]
    fn test_orphan_comment_aborts() {
        let dir = tempdir().unwrap();
        let config = config(&dir, Conversion::default());

        match Importer::new(&config).import_str(&orphan_feed()) {
            Err(Error::PostNotFound { post_id, comment_id }) => {
                assert_eq!(post_id, "404");
                assert_eq!(comment_id, "tag:blogger.com,1999:blog-1.post-9002");
            }
            other => panic!("expected PostNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_orphan_comment_skipped() {
        let dir = tempdir().unwrap();
        let config = config(&dir, Conversion {
            orphans: OrphanPolicy::Skip,
            ..Default::default()
        });

        let stats = Importer::new(&config).import_str(&orphan_feed()).unwrap();
        assert_eq!(stats.comments, 2);
        assert_eq!(stats.orphan_comments, 1);
        assert_eq!(stats.comment_files, 1);
        assert!(!dir.path().join("out").join("draft-notes-on-pre-blocks-comments.md").exists());
    }

    #[test]
    fn test_missing_input() {
        let dir = tempdir().unwrap();
        let config = config(&dir, Conversion::default());

        assert!(matches!(Importer::new(&config).run(), Err(Error::Read { .. })));
    }

    #[test]
    fn test_malformed_input() {
        let dir = tempdir().unwrap();
        let config = config(&dir, Conversion::default());

        match Importer::new(&config).import_str("<feed><entry></feed>") {
            Err(Error::Parse { path, .. }) => assert_eq!(path, dir.path().join("blog.xml")),
            other => panic!("expected a parse error, got {:?}", other),
        }
    }
}
