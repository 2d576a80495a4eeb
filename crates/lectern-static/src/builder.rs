//! Static site builder.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Datelike;
use rayon::prelude::*;
use serde::Serialize;

use lectern_config::{FeedType, LoadedSite, NavbarTarget, Position, DEFAULT_SECTION_ID};

use crate::assets::AssetPipeline;
use crate::blog::{Blog, BlogPost};
use crate::content::{build_doc_index, discover_docs, discover_pages, DocPage, PAGES_SECTION_ID};
use crate::features::FeatureGrid;
use crate::links::{apply_policy, describe_broken_links, find_broken_links, BrokenLink, LinkKind, LinkRecord};
use crate::markdown::{normalize_path, render_markdown, DocIndex, RenderContext};
use crate::routes::{output_path, register_static_files, RouteTable};
use crate::sidebar::SidebarSet;
use crate::templates::{
    AuthorContext, BlogListContext, BlogPostContext, ColorModeContext, DocContext, FeedLink,
    FooterContext, HomeContext, LogoContext, NavbarContext, NavbarLink, PageLink, PostContext,
    SiteContext, TagIndexContext, TagSummary, TemplateEngine, TocEntry,
};

/// Files the builder writes besides pages; they count as routes.
const GENERATED_FILES: &[&str] = &[
    "/assets/main.css",
    "/assets/main.js",
    "/search-index.json",
    "/sitemap.xml",
    "/robots.txt",
];

/// Configuration for building a static site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Output directory
    pub output_dir: PathBuf,

    /// Minify CSS output
    pub minify: bool,

    /// Render docs and posts marked `draft`
    pub include_drafts: bool,

    /// Script URL injected into every page by the dev server
    pub live_reload: Option<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("build"),
            minify: true,
            include_drafts: false,
            live_reload: None,
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of HTML pages generated
    pub pages: usize,

    /// Number of blog posts
    pub posts: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,

    /// Broken links reported under the `warn` policy
    pub broken_links: Vec<BrokenLink>,

    /// Unresolved markdown file links reported under the `warn` policy
    pub broken_markdown_links: Vec<BrokenLink>,
}

impl BuildResult {
    /// One-line build summary. Broken links are only counted; each one was
    /// already logged when the policy was applied.
    pub fn summary(&self) -> String {
        let mut line = format!(
            "Built {} page(s) and {} post(s) in {}ms",
            self.pages, self.posts, self.duration_ms
        );
        let broken = self.broken_links.len() + self.broken_markdown_links.len();
        if broken > 0 {
            line.push_str(&format!(" with {} broken link(s)", broken));
        }
        line
    }
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read: {0}")]
    ReadError(String),

    #[error("Failed to parse {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),

    #[error("Route {route} is produced by both {first} and {second}")]
    RouteConflict {
        route: String,
        first: String,
        second: String,
    },

    #[error("Sidebar '{sidebar}' of section '{section}' references unknown doc '{id}'")]
    UnknownDoc {
        section: String,
        sidebar: String,
        id: String,
    },

    #[error("Found {}", describe_broken_links(.0))]
    BrokenLinks(Vec<BrokenLink>),

    #[error("Found markdown file links to missing documents, {}", describe_broken_links(.0))]
    BrokenMarkdownLinks(Vec<BrokenLink>),

    #[error("Blog check {policy} failed:\n  - {}", .problems.join("\n  - "))]
    BlogPolicy { policy: String, problems: Vec<String> },

    #[error("Blog post {post} references unknown author '{key}'")]
    UnknownAuthor { post: String, key: String },

    #[error("Failed to generate feed: {0}")]
    FeedError(String),
}

impl From<minijinja::Error> for BuildError {
    fn from(e: minijinja::Error) -> Self {
        BuildError::TemplateError(e.to_string())
    }
}

/// A rendered page waiting to be written.
#[derive(Debug)]
struct RenderedPage {
    route: String,
    html: String,
    links: Vec<LinkRecord>,
    broken_file_links: Vec<BrokenLink>,
    search: Option<SearchEntry>,
}

#[derive(Debug, Clone, Serialize)]
struct SearchEntry {
    title: String,
    description: String,
    url: String,
    content: String,
}

/// Everything page rendering reads, computed once per build.
struct RenderInputs<'a> {
    site: SiteContext,
    sidebars: &'a SidebarSet,
    docs: &'a DocIndex,
}

/// Static site builder.
pub struct StaticBuilder {
    site: LoadedSite,
    config: BuildConfig,
    templates: TemplateEngine,
}

impl StaticBuilder {
    /// Create a new static builder for a validated site.
    pub fn new(site: LoadedSite, config: BuildConfig) -> Self {
        Self {
            site,
            config,
            templates: TemplateEngine::new(),
        }
    }

    pub fn site(&self) -> &LoadedSite {
        &self.site
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Build the static site.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();
        let site = &self.site.config;

        // Discover content
        let mut docs = Vec::new();
        for section in self.site.sections() {
            docs.extend(discover_docs(&section, self.config.include_drafts)?);
        }
        let pages = discover_pages(&self.site.resolve(&site.pages_dir), self.config.include_drafts)?;
        let blog = match site.blog() {
            Some(options) => Some(Blog::load(
                &self.site.resolve(&options.path),
                options,
                self.config.include_drafts,
            )?),
            None => None,
        };

        // Every route has exactly one source
        let routes = self.route_table(&docs, &pages, blog.as_ref())?;

        let sidebars = SidebarSet::resolve(&self.site.sidebars, &docs, &site.base_url)?;
        let (navbar, navbar_links) = self.navbar(&sidebars);

        let mut index = build_doc_index(docs.iter().chain(pages.iter()));
        if let Some(blog) = &blog {
            for post in &blog.posts {
                index.insert(normalize_path(&post.source_path), post.route.clone());
            }
        }

        let inputs = RenderInputs {
            site: self.site_context(navbar, blog.as_ref()),
            sidebars: &sidebars,
            docs: &index,
        };

        // Render pages in parallel
        let mut rendered: Vec<RenderedPage> = docs
            .par_iter()
            .chain(pages.par_iter())
            .map(|page| self.render_doc(&inputs, page))
            .collect::<Result<_, _>>()?;

        rendered.push(self.render_home(&inputs)?);

        if let Some(blog) = &blog {
            rendered.extend(self.render_blog(&inputs, blog)?);
        }

        // Check links before anything is written
        let mut records = navbar_links;
        records.extend(sidebars.links().iter().cloned());
        let mut broken_markdown = Vec::new();
        for page in &mut rendered {
            records.append(&mut page.links);
            broken_markdown.append(&mut page.broken_file_links);
        }

        let broken = find_broken_links(&records, &routes, &site.base_url);
        let broken_links = apply_policy(site.on_broken_links, LinkKind::Page, broken)?;
        let broken_markdown_links = apply_policy(
            site.on_broken_markdown_links,
            LinkKind::Markdown,
            broken_markdown,
        )?;

        // Write output
        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        rendered
            .par_iter()
            .map(|page| self.write_page(page))
            .collect::<Result<Vec<_>, _>>()?;

        AssetPipeline::copy_static(&self.site.resolve(&site.static_dir), &self.config.output_dir)?;
        self.generate_assets()?;

        if let Some(blog) = &blog {
            blog.write_feeds(site, &self.config.output_dir)?;
        }

        self.generate_search_index(&rendered)?;
        self.generate_sitemap(&rendered)?;

        let duration = start.elapsed();

        tracing::debug!("Route table holds {} route(s)", routes.len());

        Ok(BuildResult {
            pages: rendered.len(),
            posts: blog.as_ref().map_or(0, |b| b.posts.len()),
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
            broken_links,
            broken_markdown_links,
        })
    }

    /// Register every output route with its source.
    fn route_table(
        &self,
        docs: &[DocPage],
        pages: &[DocPage],
        blog: Option<&Blog>,
    ) -> Result<RouteTable, BuildError> {
        let mut routes = RouteTable::new();

        routes.insert("/", "homepage")?;

        for page in docs.iter().chain(pages) {
            routes.insert(&page.route, page.source_path.display().to_string())?;
        }

        if let Some(blog) = blog {
            for (route, source) in blog.routes() {
                routes.insert(&route, source)?;
            }
        }

        for file in GENERATED_FILES {
            routes.insert(file, "generated")?;
        }

        register_static_files(&mut routes, &self.site.resolve(&self.site.config.static_dir))?;

        Ok(routes)
    }

    /// Navbar items split by side, plus the internal links they emit.
    fn navbar(&self, sidebars: &SidebarSet) -> (NavbarContext, Vec<LinkRecord>) {
        let site = &self.site.config;
        let config = &site.theme.navbar;

        let mut left = Vec::new();
        let mut right = Vec::new();
        let mut records = Vec::new();

        for item in &config.items {
            let (href, external) = match &item.target {
                NavbarTarget::DocSidebar {
                    sidebar_id,
                    docs_plugin_id,
                } => {
                    let section = docs_plugin_id.as_deref().unwrap_or(DEFAULT_SECTION_ID);
                    let route = sidebars
                        .first_doc_route(section, sidebar_id)
                        .or_else(|| site.section(section).map(|s| s.route_prefix()))
                        .unwrap_or_else(|| "/".to_string());
                    (site.url_for(&route), false)
                }
                NavbarTarget::Link { to } => {
                    records.push(LinkRecord::new("navbar", "/", to.clone()));
                    (site.url_for(to), false)
                }
                NavbarTarget::External { href } => (href.clone(), true),
            };

            let link = NavbarLink {
                label: item.label.clone(),
                href,
                external,
            };
            match item.position {
                Position::Left => left.push(link),
                Position::Right => right.push(link),
            }
        }

        let navbar = NavbarContext {
            title: config.title.clone(),
            logo: config.logo.as_ref().map(|logo| LogoContext {
                alt: logo.alt.clone(),
                src: site.url_for(&logo.src),
            }),
            style: config.style.clone().unwrap_or_else(|| "light".to_string()),
            left,
            right,
        };

        (navbar, records)
    }

    fn site_context(&self, navbar: NavbarContext, blog: Option<&Blog>) -> SiteContext {
        let site = &self.site.config;
        let theme = &site.theme;

        let feeds = blog
            .map(|blog| {
                blog.options
                    .feed_types
                    .iter()
                    .map(|&feed| FeedLink {
                        mime: match feed {
                            FeedType::Rss => "application/rss+xml".to_string(),
                            FeedType::Atom => "application/atom+xml".to_string(),
                        },
                        title: format!("{} Blog {} Feed", site.title, match feed {
                            FeedType::Rss => "RSS",
                            FeedType::Atom => "Atom",
                        }),
                        href: site.url_for(&blog.feed_route(feed)),
                    })
                    .collect()
            })
            .unwrap_or_default();

        SiteContext {
            title: site.title.clone(),
            tagline: site.tagline.clone(),
            base_url: site.base_url.clone(),
            lang: site.i18n.default_locale.clone(),
            favicon: site.favicon.as_deref().map(|f| site.url_for(f)),
            image: theme.image.as_deref().map(|image| {
                format!("{}{}", site.url.trim_end_matches('/'), site.url_for(image))
            }),
            navbar,
            footer: FooterContext {
                style: theme.footer.style.clone(),
                copyright: theme.footer.copyright_for(chrono::Utc::now().year()),
            },
            color_mode: ColorModeContext {
                default_mode: theme.color_mode.default_mode.as_str().to_string(),
                disable_switch: theme.color_mode.disable_switch,
                respect_prefers_color_scheme: theme.color_mode.respect_prefers_color_scheme,
            },
            prism_theme: theme.prism.theme.clone(),
            prism_dark_theme: theme.prism.dark_theme.clone(),
            sidebar_hideable: theme.docs.sidebar.hideable,
            auto_collapse_categories: theme.docs.sidebar.auto_collapse_categories,
            feeds,
            live_reload: self.config.live_reload.clone(),
        }
    }

    fn render_context<'a>(&'a self, inputs: &'a RenderInputs<'_>, source_path: &'a Path) -> RenderContext<'a> {
        RenderContext {
            source_path,
            root: &self.site.root,
            base_url: &self.site.config.base_url,
            docs: inputs.docs,
            additional_languages: &self.site.config.theme.prism.additional_languages,
        }
    }

    /// Render a doc or standalone page.
    fn render_doc(&self, inputs: &RenderInputs<'_>, page: &DocPage) -> Result<RenderedPage, BuildError> {
        let ctx = self.render_context(inputs, &page.source_path);
        let markdown = render_markdown(&page.doc.content, &ctx);

        let hide_toc = page
            .doc
            .frontmatter
            .as_ref()
            .is_some_and(|f| f.hide_table_of_contents);
        let toc = if hide_toc { Vec::new() } else { toc_entries(&page.doc.toc) };

        let (previous, next) = inputs.sidebars.pagination(&page.route);
        let context = DocContext {
            title: page.title.clone(),
            description: page.description(),
            content: markdown.html,
            toc,
            sidebar: inputs.sidebars.for_route(&page.route),
            previous,
            next,
        };

        let template = if page.section_id == PAGES_SECTION_ID {
            "page.html"
        } else {
            "doc.html"
        };
        let html = self.templates.render(template, &inputs.site, &context)?;

        Ok(RenderedPage {
            route: page.route.clone(),
            html,
            links: page_links(&page.route, markdown.links),
            broken_file_links: broken_file_links(&page.route, markdown.broken_file_links),
            search: Some(SearchEntry {
                title: page.title.clone(),
                description: page.description().unwrap_or_default(),
                url: self.site.config.url_for(&page.route),
                content: excerpt(&page.doc.content),
            }),
        })
    }

    /// Render the homepage: hero and feature grid.
    fn render_home(&self, inputs: &RenderInputs<'_>) -> Result<RenderedPage, BuildError> {
        let site = &self.site.config;
        let homepage = &site.homepage;

        let grid = FeatureGrid::new(&homepage.features, homepage.effective_columns(), &site.base_url);
        let context = HomeContext {
            title: site.title.clone(),
            tagline: site.tagline.clone(),
            grid,
        };

        let html = self.templates.render("home.html", &inputs.site, &context)?;

        Ok(RenderedPage {
            route: "/".to_string(),
            html,
            links: homepage
                .features
                .iter()
                .map(|feature| LinkRecord::new("/", "/", feature.link.clone()))
                .collect(),
            broken_file_links: Vec::new(),
            search: None,
        })
    }

    /// Render post pages, list pages and tag pages.
    fn render_blog(&self, inputs: &RenderInputs<'_>, blog: &Blog) -> Result<Vec<RenderedPage>, BuildError> {
        let site = &self.site.config;

        // (post page, list summary)
        let posts: Vec<(RenderedPage, PostContext)> = blog
            .posts
            .par_iter()
            .enumerate()
            .map(|(index, post)| -> Result<(RenderedPage, PostContext), BuildError> {
                let ctx = self.render_context(inputs, &post.source_path);
                let full = render_markdown(&post.doc.content, &ctx);
                let summary = render_markdown(post.doc.summary().unwrap_or(&post.doc.content), &ctx);

                let summary_context = self.post_context(blog, post, summary.html);
                let context = BlogPostContext {
                    title: post.title.clone(),
                    description: post.description.clone(),
                    post: PostContext {
                        content: full.html,
                        truncated: false,
                        ..summary_context.clone()
                    },
                    toc: toc_entries(&post.doc.toc),
                    previous: index
                        .checked_sub(1)
                        .map(|i| post_link(site, &blog.posts[i])),
                    next: blog.posts.get(index + 1).map(|p| post_link(site, p)),
                };

                let html = self.templates.render("blog_post.html", &inputs.site, &context)?;

                Ok((
                    RenderedPage {
                        route: post.route.clone(),
                        html,
                        links: page_links(&post.route, full.links),
                        broken_file_links: broken_file_links(&post.route, full.broken_file_links),
                        search: Some(SearchEntry {
                            title: post.title.clone(),
                            description: post.description.clone().unwrap_or_default(),
                            url: site.url_for(&post.route),
                            content: excerpt(&post.doc.content),
                        }),
                    },
                    summary_context,
                ))
            })
            .collect::<Result<_, _>>()?;

        let (mut rendered, summaries): (Vec<RenderedPage>, Vec<PostContext>) = posts.into_iter().unzip();

        for list in blog.list_pages() {
            let context = BlogListContext {
                title: "Blog".to_string(),
                heading: "Recent posts".to_string(),
                posts: summaries[list.posts.clone()].to_vec(),
                newer: list.newer.as_deref().map(|r| site.url_for(r)),
                older: list.older.as_deref().map(|r| site.url_for(r)),
            };
            rendered.push(self.render_page_without_links(inputs, "blog_list.html", &list.route, &context)?);
        }

        if !blog.tags.is_empty() {
            let context = TagIndexContext {
                title: "Tags".to_string(),
                tags: blog
                    .tags
                    .values()
                    .map(|tag| TagSummary {
                        label: tag.label.clone(),
                        href: site.url_for(&blog.tag_route(&tag.permalink)),
                        count: tag.posts.len(),
                    })
                    .collect(),
            };
            rendered.push(self.render_page_without_links(inputs, "blog_tags.html", &blog.tags_route(), &context)?);

            for tag in blog.tags.values() {
                let context = BlogListContext {
                    title: format!("Posts tagged \"{}\"", tag.label),
                    heading: format!(
                        "{} post{} tagged with \"{}\"",
                        tag.posts.len(),
                        if tag.posts.len() == 1 { "" } else { "s" },
                        tag.label
                    ),
                    posts: tag.posts.iter().map(|&i| summaries[i].clone()).collect(),
                    newer: None,
                    older: None,
                };
                rendered.push(self.render_page_without_links(
                    inputs,
                    "blog_list.html",
                    &blog.tag_route(&tag.permalink),
                    &context,
                )?);
            }
        }

        Ok(rendered)
    }

    fn post_context(&self, blog: &Blog, post: &BlogPost, content: String) -> PostContext {
        let site = &self.site.config;
        PostContext {
            title: post.title.clone(),
            href: site.url_for(&post.route),
            date: post.date.format("%B %-d, %Y").to_string(),
            date_iso: post.date.format("%Y-%m-%d").to_string(),
            reading_minutes: blog.options.show_reading_time.then_some(post.reading_minutes),
            authors: post
                .authors
                .iter()
                .map(|a| AuthorContext {
                    name: a.name.clone(),
                    title: a.title.clone(),
                    url: a.url.clone(),
                    image_url: a.image_url.clone(),
                })
                .collect(),
            tags: post
                .tags
                .iter()
                .filter_map(|permalink| blog.tags.get(permalink))
                .map(|tag| PageLink {
                    title: tag.label.clone(),
                    href: site.url_for(&blog.tag_route(&tag.permalink)),
                })
                .collect(),
            content,
            truncated: post.doc.is_truncated(),
        }
    }

    /// Render a generated page whose links all point at known routes.
    fn render_page_without_links<T: Serialize>(
        &self,
        inputs: &RenderInputs<'_>,
        template: &str,
        route: &str,
        context: &T,
    ) -> Result<RenderedPage, BuildError> {
        Ok(RenderedPage {
            route: route.to_string(),
            html: self.templates.render(template, &inputs.site, context)?,
            links: Vec::new(),
            broken_file_links: Vec::new(),
            search: None,
        })
    }

    fn write_page(&self, page: &RenderedPage) -> Result<(), BuildError> {
        let path = output_path(&self.config.output_dir, &page.route);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
        }

        fs::write(&path, &page.html)
            .map_err(|e| BuildError::WriteError(format!("{}: {}", path.display(), e)))
    }

    /// Generate static assets.
    fn generate_assets(&self) -> Result<(), BuildError> {
        let assets_dir = self.config.output_dir.join("assets");
        fs::create_dir_all(&assets_dir).map_err(|e| BuildError::WriteError(e.to_string()))?;

        let custom_css: Vec<PathBuf> = self
            .site
            .config
            .custom_css()
            .into_iter()
            .map(|path| self.site.resolve(path))
            .collect();
        let css = AssetPipeline::bundle_css(&custom_css, self.config.minify)?;
        fs::write(assets_dir.join("main.css"), css)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let js = AssetPipeline::generate_js();
        fs::write(assets_dir.join("main.js"), js)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Generate search index.
    fn generate_search_index(&self, pages: &[RenderedPage]) -> Result<(), BuildError> {
        let index: Vec<&SearchEntry> = pages.iter().filter_map(|p| p.search.as_ref()).collect();

        let json = serde_json::to_string_pretty(&index)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        fs::write(self.config.output_dir.join("search-index.json"), json)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Generate sitemap and robots.txt.
    fn generate_sitemap(&self, pages: &[RenderedPage]) -> Result<(), BuildError> {
        let site = &self.site.config;
        let origin = site.url.trim_end_matches('/');

        let mut routes: Vec<&str> = pages.iter().map(|p| p.route.as_str()).collect();
        routes.sort_unstable();

        let urls: Vec<String> = routes
            .iter()
            .map(|route| {
                let loc = format!("{}{}", origin, site.url_for(route));
                format!("  <url>\n    <loc>{}</loc>\n  </url>", escape_xml(&loc))
            })
            .collect();

        let sitemap = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
{}
</urlset>"#,
            urls.join("\n")
        );

        fs::write(self.config.output_dir.join("sitemap.xml"), sitemap)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let robots = format!(
            "User-agent: *\nAllow: /\nSitemap: {}{}sitemap.xml\n",
            origin, site.base_url
        );
        fs::write(self.config.output_dir.join("robots.txt"), robots)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(())
    }
}

fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}

fn toc_entries(toc: &[lectern_mdx::TocEntry]) -> Vec<TocEntry> {
    toc.iter()
        .map(|e| TocEntry {
            title: e.title.clone(),
            id: e.id.clone(),
            level: e.level,
        })
        .collect()
}

fn page_links(route: &str, links: Vec<String>) -> Vec<LinkRecord> {
    links
        .into_iter()
        .map(|href| LinkRecord::new(route, route, href))
        .collect()
}

fn broken_file_links(route: &str, links: Vec<String>) -> Vec<BrokenLink> {
    links
        .into_iter()
        .map(|link| BrokenLink {
            source: route.to_string(),
            link,
        })
        .collect()
}

fn post_link(site: &lectern_config::SiteConfig, post: &BlogPost) -> PageLink {
    PageLink {
        title: post.title.clone(),
        href: site.url_for(&post.route),
    }
}

/// First lines of prose, for the search index.
fn excerpt(content: &str) -> String {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#') && !l.starts_with("```") && !l.starts_with("<!--"))
        .take(10)
        .collect::<Vec<_>>()
        .join(" ")
}
