//! Blog posts, tags, authors and syndication feeds.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use atom_syndication::{
    EntryBuilder, FeedBuilder, FixedDateTime, GeneratorBuilder, LinkBuilder, PersonBuilder, Text,
};
use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use rss::validation::Validate;
use rss::{CategoryBuilder, ChannelBuilder, GuidBuilder, ItemBuilder};
use serde::Deserialize;

use lectern_config::{normalize_route, BlogOptions, FeedType, Policy, SiteConfig};
use lectern_mdx::{markdown_options, slugify, Author, AuthorRef, ParsedDoc};

use crate::builder::BuildError;
use crate::content::{markdown_files, read_document};
use crate::routes::join_route;

/// Posts per list page.
pub const POSTS_PER_PAGE: usize = 10;

/// Reading speed used for the reading time estimate.
pub const WORDS_PER_MINUTE: usize = 200;

static DATED_FILE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2})-(.+)$").expect("valid date pattern")
});

/// A tag declared in `tags.yml`.
#[derive(Debug, Clone, Deserialize)]
pub struct TagDefinition {
    pub label: String,
    #[serde(default)]
    pub permalink: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A tag with the posts carrying it.
#[derive(Debug, Clone)]
pub struct BlogTag {
    pub label: String,
    pub permalink: String,
    pub description: Option<String>,
    /// Indices into [`Blog::posts`]
    pub posts: Vec<usize>,
}

#[derive(Debug, Clone)]
pub struct BlogPost {
    pub slug: String,
    pub source_path: PathBuf,
    pub route: String,
    pub title: String,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub authors: Vec<Author>,
    /// Tag permalinks
    pub tags: Vec<String>,
    pub reading_minutes: usize,
    /// Summary (or whole post when untruncated) as HTML, for feeds
    pub summary_html: String,
    pub doc: ParsedDoc,
}

/// One page of the post list.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage {
    pub route: String,
    pub posts: Range<usize>,
    pub newer: Option<String>,
    pub older: Option<String>,
}

/// The loaded blog.
#[derive(Debug, Clone)]
pub struct Blog {
    pub options: BlogOptions,
    pub dir: PathBuf,
    /// `/blog`
    pub route_prefix: String,
    /// Newest first
    pub posts: Vec<BlogPost>,
    /// Keyed by permalink
    pub tags: BTreeMap<String, BlogTag>,
}

impl Blog {
    /// Load every post under `dir` and apply the blog policies.
    pub fn load(dir: &Path, options: &BlogOptions, include_drafts: bool) -> Result<Self, BuildError> {
        let route_prefix = join_route("", &normalize_route(&options.route_base_path));

        if !dir.is_dir() {
            tracing::debug!("No blog directory at {}", dir.display());
            return Ok(Self {
                options: options.clone(),
                dir: dir.to_path_buf(),
                route_prefix,
                posts: Vec::new(),
                tags: BTreeMap::new(),
            });
        }

        let authors: HashMap<String, Author> = read_yaml(&dir.join("authors.yml"))?.unwrap_or_default();
        let tag_defs: Option<HashMap<String, TagDefinition>> = read_yaml(&dir.join("tags.yml"))?;

        let mut posts = Vec::new();
        let mut inline_tags = Vec::new();
        let mut inline_authors = Vec::new();
        let mut untruncated = Vec::new();

        for path in markdown_files(dir) {
            let doc = read_document(&path)?;
            let fm = doc.frontmatter.clone().unwrap_or_default();

            if fm.draft && !include_drafts {
                continue;
            }

            let name = post_name(&path);
            let (file_date, file_slug) = match DATED_FILE_NAME.captures(&name) {
                Some(caps) => (
                    NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d").ok(),
                    caps[2].to_string(),
                ),
                None => (None, name.clone()),
            };

            let date = fm
                .date
                .as_deref()
                .and_then(parse_date)
                .or(file_date)
                .unwrap_or_else(|| modified_date(&path));

            let slug = fm
                .slug
                .clone()
                .map(|s| s.trim_matches('/').to_string())
                .unwrap_or(file_slug);
            let route = join_route(&route_prefix, &slug);
            let source = path.display().to_string();

            let mut post_authors = Vec::new();
            for author in fm.authors.to_vec() {
                match author {
                    AuthorRef::Key(key) => {
                        let found = authors.get(key).ok_or_else(|| BuildError::UnknownAuthor {
                            post: source.clone(),
                            key: key.clone(),
                        })?;
                        post_authors.push(found.clone());
                    }
                    AuthorRef::Inline(author) => {
                        inline_authors.push(format!(
                            "{}: author '{}' is declared inline instead of in authors.yml",
                            source, author.name
                        ));
                        post_authors.push(author.clone());
                    }
                }
            }

            let mut post_tags = Vec::new();
            for tag in fm.tags.to_vec() {
                if let Some(defs) = &tag_defs {
                    if !defs.contains_key(tag) {
                        inline_tags.push(format!(
                            "{}: tag '{}' is not declared in tags.yml",
                            source, tag
                        ));
                    }
                }
                post_tags.push(tag.clone());
            }

            if !doc.is_truncated() {
                untruncated.push(format!("{}: no truncate marker", source));
            }

            let title = doc.title().unwrap_or_else(|| slug.clone());
            let summary_html = markdown_html(doc.summary().unwrap_or(&doc.content));

            posts.push(BlogPost {
                slug,
                source_path: path,
                route,
                title,
                date,
                description: fm.description.clone(),
                authors: post_authors,
                tags: post_tags,
                reading_minutes: reading_minutes(doc.word_count),
                summary_html,
                doc,
            });
        }

        apply_blog_policy(options.on_inline_tags, "on_inline_tags", inline_tags)?;
        apply_blog_policy(options.on_inline_authors, "on_inline_authors", inline_authors)?;
        apply_blog_policy(
            options.on_untruncated_blog_posts,
            "on_untruncated_blog_posts",
            untruncated,
        )?;

        posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));

        // Tag keys become permalinks once posts are in their final order.
        let mut tags: BTreeMap<String, BlogTag> = BTreeMap::new();
        for (index, post) in posts.iter_mut().enumerate() {
            let mut permalinks = Vec::new();
            for key in &post.tags {
                let def = tag_defs.as_ref().and_then(|defs| defs.get(key));
                let permalink = def
                    .and_then(|d| d.permalink.as_deref())
                    .map(|p| p.trim_matches('/').to_string())
                    .unwrap_or_else(|| slugify(key));

                let tag = tags.entry(permalink.clone()).or_insert_with(|| BlogTag {
                    label: def.map(|d| d.label.clone()).unwrap_or_else(|| key.clone()),
                    permalink: permalink.clone(),
                    description: def.and_then(|d| d.description.clone()),
                    posts: Vec::new(),
                });
                tag.posts.push(index);
                permalinks.push(permalink);
            }
            post.tags = permalinks;
        }

        tracing::debug!("Blog: {} post(s), {} tag(s)", posts.len(), tags.len());

        Ok(Self {
            options: options.clone(),
            dir: dir.to_path_buf(),
            route_prefix,
            posts,
            tags,
        })
    }

    /// List pages: `/blog`, `/blog/page/2`, ...
    pub fn list_pages(&self) -> Vec<ListPage> {
        let count = self.posts.len().div_ceil(POSTS_PER_PAGE).max(1);

        (0..count)
            .map(|page| ListPage {
                route: self.list_route(page),
                posts: page * POSTS_PER_PAGE..((page + 1) * POSTS_PER_PAGE).min(self.posts.len()),
                newer: page.checked_sub(1).map(|p| self.list_route(p)),
                older: (page + 1 < count).then(|| self.list_route(page + 1)),
            })
            .collect()
    }

    fn list_route(&self, page: usize) -> String {
        if page == 0 {
            self.route_prefix.clone()
        } else {
            join_route(&self.route_prefix, &format!("page/{}", page + 1))
        }
    }

    pub fn tags_route(&self) -> String {
        join_route(&self.route_prefix, "tags")
    }

    pub fn tag_route(&self, permalink: &str) -> String {
        join_route(&self.tags_route(), permalink)
    }

    pub fn feed_route(&self, feed: FeedType) -> String {
        join_route(&self.route_prefix, feed_file(feed))
    }

    /// Every route the blog produces, with its source.
    pub fn routes(&self) -> Vec<(String, String)> {
        let mut routes: Vec<(String, String)> = self
            .list_pages()
            .into_iter()
            .map(|page| (page.route, "blog list".to_string()))
            .collect();

        routes.extend(
            self.posts
                .iter()
                .map(|post| (post.route.clone(), post.source_path.display().to_string())),
        );

        if !self.tags.is_empty() {
            routes.push((self.tags_route(), "blog tags".to_string()));
            routes.extend(
                self.tags
                    .keys()
                    .map(|permalink| (self.tag_route(permalink), format!("blog tag '{}'", permalink))),
            );
        }

        routes.extend(
            self.options
                .feed_types
                .iter()
                .map(|&feed| (self.feed_route(feed), "blog feed".to_string())),
        );

        routes
    }

    /// RSS 2.0 feed of every post.
    pub fn rss(&self, site: &SiteConfig) -> Result<String, BuildError> {
        let items: Vec<rss::Item> = self
            .posts
            .iter()
            .map(|post| {
                let link = absolute_url(site, &post.route);
                ItemBuilder::default()
                    .title(post.title.clone())
                    .link(Some(link.clone()))
                    .guid(GuidBuilder::default().permalink(true).value(link).build())
                    .description(post.description.clone().unwrap_or_else(|| post.summary_html.clone()))
                    .pub_date(midnight(post.date).to_rfc2822())
                    .author(rss_author(&post.authors))
                    .categories(
                        post.tags
                            .iter()
                            .filter_map(|t| self.tags.get(t))
                            .map(|t| CategoryBuilder::default().name(t.label.clone()).build())
                            .collect::<Vec<_>>(),
                    )
                    .build()
            })
            .collect();

        let channel = ChannelBuilder::default()
            .title(format!("{} Blog", site.title))
            .link(absolute_url(site, &self.route_prefix))
            .description(format!("{} Blog", site.title))
            .language(Some(site.i18n.default_locale.clone()))
            .generator(Some("lectern".to_string()))
            .items(items)
            .build();

        channel
            .validate()
            .map_err(|e| BuildError::FeedError(format!("RSS validation failed: {}", e)))?;

        Ok(with_stylesheet(channel.to_string(), self.xslt_href(FeedType::Rss)))
    }

    /// Atom 1.0 feed of every post.
    pub fn atom(&self, site: &SiteConfig) -> Result<String, BuildError> {
        let blog_url = absolute_url(site, &self.route_prefix);

        let entries: Vec<atom_syndication::Entry> = self
            .posts
            .iter()
            .map(|post| {
                let link = absolute_url(site, &post.route);
                let updated = midnight(post.date).fixed_offset();
                EntryBuilder::default()
                    .title(Text::plain(post.title.clone()))
                    .id(link.clone())
                    .updated(updated)
                    .published(Some(updated))
                    .links(vec![LinkBuilder::default()
                        .href(link)
                        .rel("alternate".to_string())
                        .build()])
                    .summary(Some(Text::html(post.summary_html.clone())))
                    .authors(
                        post.authors
                            .iter()
                            .map(|a| {
                                PersonBuilder::default()
                                    .name(a.name.clone())
                                    .email(a.email.clone())
                                    .uri(a.url.clone())
                                    .build()
                            })
                            .collect::<Vec<_>>(),
                    )
                    .build()
            })
            .collect();

        let updated: FixedDateTime = self
            .posts
            .first()
            .map(|post| midnight(post.date))
            .unwrap_or_default()
            .fixed_offset();

        let feed = FeedBuilder::default()
            .title(Text::plain(format!("{} Blog", site.title)))
            .id(blog_url.clone())
            .updated(updated)
            .links(vec![
                LinkBuilder::default()
                    .href(absolute_url(site, &self.feed_route(FeedType::Atom)))
                    .rel("self".to_string())
                    .mime_type(Some("application/atom+xml".to_string()))
                    .build(),
                LinkBuilder::default()
                    .href(blog_url)
                    .rel("alternate".to_string())
                    .build(),
            ])
            .subtitle(Some(Text::plain(format!("{} Blog", site.title))))
            .generator(Some(GeneratorBuilder::default().value("lectern").build()))
            .lang(Some(site.i18n.default_locale.clone()))
            .entries(entries)
            .build();

        Ok(with_stylesheet(feed.to_string(), self.xslt_href(FeedType::Atom)))
    }

    fn xslt_href(&self, feed: FeedType) -> Option<String> {
        self.options.xslt.then(|| xslt_file(feed).to_string())
    }

    /// Write the configured feeds (and their stylesheets) under `output_dir`.
    pub fn write_feeds(&self, site: &SiteConfig, output_dir: &Path) -> Result<usize, BuildError> {
        if self.options.feed_types.is_empty() {
            return Ok(0);
        }

        let dir = output_dir.join(self.route_prefix.trim_start_matches('/'));
        fs::create_dir_all(&dir).map_err(|e| BuildError::WriteError(e.to_string()))?;

        for &feed in &self.options.feed_types {
            let xml = match feed {
                FeedType::Rss => self.rss(site)?,
                FeedType::Atom => self.atom(site)?,
            };
            fs::write(dir.join(feed_file(feed)), xml)
                .map_err(|e| BuildError::WriteError(e.to_string()))?;

            if self.options.xslt {
                let stylesheet = match feed {
                    FeedType::Rss => RSS_XSLT,
                    FeedType::Atom => ATOM_XSLT,
                };
                fs::write(dir.join(xslt_file(feed)), stylesheet)
                    .map_err(|e| BuildError::WriteError(e.to_string()))?;
            }

            tracing::debug!("Wrote {}", dir.join(feed_file(feed)).display());
        }

        Ok(self.options.feed_types.len())
    }
}

/// Minutes to read `words` words, at least one.
pub fn reading_minutes(words: usize) -> usize {
    words.div_ceil(WORDS_PER_MINUTE).max(1)
}

fn apply_blog_policy(policy: Policy, name: &str, problems: Vec<String>) -> Result<(), BuildError> {
    if problems.is_empty() {
        return Ok(());
    }

    match policy {
        Policy::Throw => Err(BuildError::BlogPolicy {
            policy: name.to_string(),
            problems,
        }),
        Policy::Warn => {
            for problem in &problems {
                tracing::warn!("{} ({})", problem, name);
            }
            Ok(())
        }
        Policy::Ignore => Ok(()),
    }
}

fn read_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>, BuildError> {
    if !path.is_file() {
        return Ok(None);
    }
    let source = fs::read_to_string(path)
        .map_err(|e| BuildError::ReadError(format!("{}: {}", path.display(), e)))?;
    serde_yaml::from_str(&source)
        .map(Some)
        .map_err(|e| BuildError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
}

/// `2021-08-26-welcome.md` and `2021-08-26-welcome/index.md` are both `2021-08-26-welcome`.
fn post_name(path: &Path) -> String {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    if stem == "index" {
        if let Some(dir) = path.parent().and_then(|p| p.file_name()).and_then(|n| n.to_str()) {
            return dir.to_string();
        }
    }
    stem.to_string()
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.get(..10)?, "%Y-%m-%d").ok()
}

fn modified_date(path: &Path) -> NaiveDate {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .map(|t| DateTime::<Utc>::from(t).date_naive())
        .unwrap_or_else(|_| Utc::now().date_naive())
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc()
}

fn rss_author(authors: &[Author]) -> Option<String> {
    authors
        .iter()
        .find_map(|a| a.email.as_ref().map(|email| format!("{} ({})", email, a.name)))
}

fn absolute_url(site: &SiteConfig, route: &str) -> String {
    format!("{}{}", site.url.trim_end_matches('/'), site.url_for(route))
}

fn markdown_html(source: &str) -> String {
    let mut html = String::new();
    pulldown_cmark::html::push_html(
        &mut html,
        pulldown_cmark::Parser::new_ext(source, markdown_options()),
    );
    html
}

fn feed_file(feed: FeedType) -> &'static str {
    match feed {
        FeedType::Rss => "rss.xml",
        FeedType::Atom => "atom.xml",
    }
}

fn xslt_file(feed: FeedType) -> &'static str {
    match feed {
        FeedType::Rss => "rss.xsl",
        FeedType::Atom => "atom.xsl",
    }
}

/// Insert an `xml-stylesheet` processing instruction after the XML declaration.
fn with_stylesheet(xml: String, href: Option<String>) -> String {
    let Some(href) = href else {
        return xml;
    };
    let pi = format!("<?xml-stylesheet type=\"text/xsl\" href=\"{}\"?>", href);

    match xml.strip_prefix("<?xml").and_then(|rest| rest.find("?>")) {
        Some(end) => {
            let split = "<?xml".len() + end + 2;
            format!("{}\n{}{}", &xml[..split], pi, &xml[split..])
        }
        None => format!("{}\n{}", pi, xml),
    }
}

const RSS_XSLT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<xsl:stylesheet version="1.0" xmlns:xsl="http://www.w3.org/1999/XSL/Transform">
  <xsl:output method="html" encoding="utf-8"/>
  <xsl:template match="/">
    <html>
      <head><title><xsl:value-of select="/rss/channel/title"/></title></head>
      <body>
        <h1><xsl:value-of select="/rss/channel/title"/></h1>
        <xsl:for-each select="/rss/channel/item">
          <article>
            <h2><a href="{link}"><xsl:value-of select="title"/></a></h2>
            <time><xsl:value-of select="pubDate"/></time>
          </article>
        </xsl:for-each>
      </body>
    </html>
  </xsl:template>
</xsl:stylesheet>
"#;

const ATOM_XSLT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<xsl:stylesheet version="1.0" xmlns:xsl="http://www.w3.org/1999/XSL/Transform" xmlns:atom="http://www.w3.org/2005/Atom">
  <xsl:output method="html" encoding="utf-8"/>
  <xsl:template match="/">
    <html>
      <head><title><xsl:value-of select="/atom:feed/atom:title"/></title></head>
      <body>
        <h1><xsl:value-of select="/atom:feed/atom:title"/></h1>
        <xsl:for-each select="/atom:feed/atom:entry">
          <article>
            <h2><a href="{atom:link/@href}"><xsl:value-of select="atom:title"/></a></h2>
            <time><xsl:value-of select="atom:updated"/></time>
          </article>
        </xsl:for-each>
      </body>
    </html>
  </xsl:template>
</xsl:stylesheet>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn options() -> BlogOptions {
        BlogOptions {
            show_reading_time: true,
            feed_types: vec![FeedType::Rss, FeedType::Atom],
            ..Default::default()
        }
    }

    fn site() -> SiteConfig {
        SiteConfig {
            title: "Xceed".to_string(),
            url: "https://xceedsoftware.github.io".to_string(),
            base_url: "/xceed-libs-doc/".to_string(),
            ..Default::default()
        }
    }

    fn write_posts(dir: &Path) {
        fs::write(
            dir.join("authors.yml"),
            "xceed:\n  name: Xceed Team\n  email: support@xceed.com\n",
        )
        .unwrap();
        fs::write(
            dir.join("2021-08-26-welcome.md"),
            "---\nauthors: xceed\ntags: [release]\n---\n# Welcome\n\nFirst post.\n\n<!-- truncate -->\n\nMore text.\n",
        )
        .unwrap();
        fs::write(
            dir.join("2022-01-10-workbooks.md"),
            "---\ntitle: Workbooks 2.0\nauthors: [xceed]\ntags: [release, workbooks]\n---\nNew version.\n<!-- truncate -->\nDetails.\n",
        )
        .unwrap();
    }

    #[test]
    fn loads_posts_newest_first() {
        let temp = tempdir().unwrap();
        write_posts(temp.path());

        let blog = Blog::load(temp.path(), &options(), false).unwrap();

        let routes: Vec<&str> = blog.posts.iter().map(|p| p.route.as_str()).collect();
        assert_eq!(routes, vec!["/blog/workbooks", "/blog/welcome"]);
        assert_eq!(blog.posts[1].title, "Welcome");
        assert_eq!(blog.posts[1].date, NaiveDate::from_ymd_opt(2021, 8, 26).unwrap());
        assert_eq!(blog.posts[0].authors[0].name, "Xceed Team");
        assert!(blog.posts[1].summary_html.contains("First post."));
        assert!(!blog.posts[1].summary_html.contains("More text."));
    }

    #[test]
    fn groups_posts_by_tag() {
        let temp = tempdir().unwrap();
        write_posts(temp.path());

        let blog = Blog::load(temp.path(), &options(), false).unwrap();

        assert_eq!(blog.tags["release"].posts, vec![0, 1]);
        assert_eq!(blog.tags["workbooks"].posts, vec![0]);
        assert_eq!(blog.tag_route("release"), "/blog/tags/release");

        let routes: Vec<String> = blog.routes().into_iter().map(|(r, _)| r).collect();
        assert!(routes.contains(&"/blog".to_string()));
        assert!(routes.contains(&"/blog/tags".to_string()));
        assert!(routes.contains(&"/blog/rss.xml".to_string()));
        assert!(routes.contains(&"/blog/atom.xml".to_string()));
    }

    #[test]
    fn paginates_list() {
        let temp = tempdir().unwrap();
        for day in 1..=12 {
            fs::write(
                temp.path().join(format!("2024-01-{:02}-post.md", day)),
                format!("---\nslug: post-{}\n---\nBody\n<!-- truncate -->\n", day),
            )
            .unwrap();
        }

        let blog = Blog::load(temp.path(), &BlogOptions::default(), false).unwrap();
        let pages = blog.list_pages();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].route, "/blog");
        assert_eq!(pages[0].posts, 0..10);
        assert_eq!(pages[0].older.as_deref(), Some("/blog/page/2"));
        assert_eq!(pages[1].posts, 10..12);
        assert_eq!(pages[1].newer.as_deref(), Some("/blog"));
        assert_eq!(blog.posts[0].slug, "post-12");
    }

    #[test]
    fn unknown_author_key_fails() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("post.md"), "---\nauthors: nobody\n---\n").unwrap();

        let err = Blog::load(temp.path(), &BlogOptions::default(), false).unwrap_err();

        assert!(matches!(err, BuildError::UnknownAuthor { ref key, .. } if key == "nobody"));
    }

    #[test]
    fn policies_throw_when_configured() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("tags.yml"), "release:\n  label: Release\n").unwrap();
        fs::write(
            temp.path().join("post.md"),
            "---\ntags: [unknown]\nauthors:\n  - name: Jane\n---\nText\n<!-- truncate -->\n",
        )
        .unwrap();

        let throw_tags = BlogOptions {
            on_inline_tags: Policy::Throw,
            ..Default::default()
        };
        let err = Blog::load(temp.path(), &throw_tags, false).unwrap_err();
        assert!(err.to_string().contains("unknown"));

        let throw_authors = BlogOptions {
            on_inline_authors: Policy::Throw,
            ..Default::default()
        };
        let err = Blog::load(temp.path(), &throw_authors, false).unwrap_err();
        assert!(err.to_string().contains("Jane"));

        assert!(Blog::load(temp.path(), &BlogOptions::default(), false).is_ok());
    }

    #[test]
    fn untruncated_posts_follow_policy() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("post.md"), "No marker here.\n").unwrap();

        let throw = BlogOptions {
            on_untruncated_blog_posts: Policy::Throw,
            ..Default::default()
        };
        assert!(matches!(
            Blog::load(temp.path(), &throw, false),
            Err(BuildError::BlogPolicy { .. })
        ));

        let ignore = BlogOptions {
            on_untruncated_blog_posts: Policy::Ignore,
            ..Default::default()
        };
        let blog = Blog::load(temp.path(), &ignore, false).unwrap();
        assert_eq!(blog.posts[0].slug, "post");
    }

    #[test]
    fn writes_feeds_with_stylesheets() {
        let temp = tempdir().unwrap();
        let blog_dir = temp.path().join("blog");
        let out = temp.path().join("build");
        fs::create_dir_all(&blog_dir).unwrap();
        write_posts(&blog_dir);

        let options = BlogOptions {
            xslt: true,
            ..options()
        };
        let blog = Blog::load(&blog_dir, &options, false).unwrap();
        assert_eq!(blog.write_feeds(&site(), &out).unwrap(), 2);

        let rss = fs::read_to_string(out.join("blog/rss.xml")).unwrap();
        assert!(rss.contains("<?xml-stylesheet type=\"text/xsl\" href=\"rss.xsl\"?>"));
        assert!(rss.contains("https://xceedsoftware.github.io/xceed-libs-doc/blog/welcome"));
        assert!(rss.contains("support@xceed.com (Xceed Team)"));

        let atom = fs::read_to_string(out.join("blog/atom.xml")).unwrap();
        assert!(atom.contains("Workbooks 2.0"));
        assert!(atom.contains("2022-01-10"));
        assert!(out.join("blog/atom.xsl").exists());
    }

    #[test]
    fn reading_time_rounds_up() {
        assert_eq!(reading_minutes(0), 1);
        assert_eq!(reading_minutes(200), 1);
        assert_eq!(reading_minutes(201), 2);
    }

    #[test]
    fn inserts_stylesheet_after_declaration() {
        let xml = with_stylesheet(
            "<?xml version=\"1.0\"?><rss/>".to_string(),
            Some("rss.xsl".to_string()),
        );
        assert_eq!(
            xml,
            "<?xml version=\"1.0\"?>\n<?xml-stylesheet type=\"text/xsl\" href=\"rss.xsl\"?><rss/>"
        );
    }
}
