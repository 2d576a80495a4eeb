//! Template engine for rendering site pages.

use minijinja::{context, Environment, Value};
use serde::Serialize;

use crate::features::FeatureGrid;
use crate::markdown::escape_html;

/// A sidebar entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NavItem {
    /// Display title
    pub title: String,
    /// Rendered href (base URL applied); empty for categories without a page
    pub path: String,
    /// Site route of the target page; empty for external links and bare categories
    pub route: String,
    /// Child items
    pub children: Vec<NavItem>,
    /// Whether this is the active page
    pub active: bool,
    /// Whether a category starts folded
    pub collapsed: bool,
    /// Opens another site
    pub external: bool,
}

/// A table of contents entry.
#[derive(Debug, Clone, Serialize)]
pub struct TocEntry {
    /// Heading text
    pub title: String,
    /// Anchor ID
    pub id: String,
    /// Heading level (1-6)
    pub level: u8,
}

/// A navbar link.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavbarLink {
    pub label: String,
    pub href: String,
    pub external: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavbarContext {
    pub title: Option<String>,
    pub logo: Option<LogoContext>,
    pub style: String,
    pub left: Vec<NavbarLink>,
    pub right: Vec<NavbarLink>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogoContext {
    pub alt: String,
    pub src: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FooterContext {
    pub style: String,
    pub copyright: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColorModeContext {
    pub default_mode: String,
    pub disable_switch: bool,
    pub respect_prefers_color_scheme: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedLink {
    pub mime: String,
    pub title: String,
    pub href: String,
}

/// Site-wide values shared by every page.
#[derive(Debug, Clone, Serialize)]
pub struct SiteContext {
    pub title: String,
    pub tagline: String,
    pub base_url: String,
    pub lang: String,
    pub favicon: Option<String>,
    /// Absolute URL of the social card
    pub image: Option<String>,
    pub navbar: NavbarContext,
    pub footer: FooterContext,
    pub color_mode: ColorModeContext,
    pub prism_theme: String,
    pub prism_dark_theme: String,
    pub sidebar_hideable: bool,
    pub auto_collapse_categories: bool,
    pub feeds: Vec<FeedLink>,
    /// Dev-server reload client
    pub live_reload: Option<String>,
}

/// A previous/next link under a doc.
#[derive(Debug, Clone, Serialize)]
pub struct PageLink {
    pub title: String,
    pub href: String,
}

/// Values for `doc.html` and `page.html`.
#[derive(Debug, Clone, Serialize)]
pub struct DocContext {
    pub title: String,
    pub description: Option<String>,
    pub content: String,
    pub toc: Vec<TocEntry>,
    pub sidebar: Vec<NavItem>,
    pub previous: Option<PageLink>,
    pub next: Option<PageLink>,
}

/// Values for `home.html`.
#[derive(Debug, Clone, Serialize)]
pub struct HomeContext {
    pub title: String,
    pub tagline: String,
    pub grid: FeatureGrid,
}

/// A post as shown on list pages and its own page.
#[derive(Debug, Clone, Serialize)]
pub struct PostContext {
    pub title: String,
    pub href: String,
    pub date: String,
    pub date_iso: String,
    pub reading_minutes: Option<usize>,
    pub authors: Vec<AuthorContext>,
    pub tags: Vec<PageLink>,
    /// Summary on list pages, full body on the post page
    pub content: String,
    pub truncated: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthorContext {
    pub name: String,
    pub title: Option<String>,
    pub url: Option<String>,
    pub image_url: Option<String>,
}

/// Values for `blog_list.html`.
#[derive(Debug, Clone, Serialize)]
pub struct BlogListContext {
    pub title: String,
    pub heading: String,
    pub posts: Vec<PostContext>,
    pub newer: Option<String>,
    pub older: Option<String>,
}

/// Values for `blog_post.html`.
#[derive(Debug, Clone, Serialize)]
pub struct BlogPostContext {
    pub title: String,
    pub description: Option<String>,
    pub post: PostContext,
    pub toc: Vec<TocEntry>,
    pub previous: Option<PageLink>,
    pub next: Option<PageLink>,
}

/// Values for `blog_tags.html`.
#[derive(Debug, Clone, Serialize)]
pub struct TagIndexContext {
    pub title: String,
    pub tags: Vec<TagSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TagSummary {
    pub label: String,
    pub href: String,
    pub count: usize,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        for (name, source) in TEMPLATES {
            env.add_template_owned(name.to_string(), source.to_string())
                .expect("Built-in template must parse");
        }

        // Attribute values are escaped here so URLs keep their slashes.
        env.add_filter("attr", |value: String| {
            Value::from_safe_string(escape_html(&value))
        });

        Self { env }
    }

    /// Render a page template with the shared site context.
    pub fn render<T: Serialize>(
        &self,
        template: &str,
        site: &SiteContext,
        page: &T,
    ) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template)?;
        tmpl.render(context! {
            site => site,
            page => page,
        })
    }

    /// Render the homepage feature grid on its own.
    pub fn render_features(&self, grid: &FeatureGrid) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("features.html")?;
        tmpl.render(context! { grid => grid })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", BASE_TEMPLATE),
    ("navbar.html", NAVBAR_TEMPLATE),
    ("footer.html", FOOTER_TEMPLATE),
    ("sidebar.html", SIDEBAR_TEMPLATE),
    ("toc.html", TOC_TEMPLATE),
    ("doc.html", DOC_TEMPLATE),
    ("page.html", PAGE_TEMPLATE),
    ("home.html", HOME_TEMPLATE),
    ("features.html", FEATURES_TEMPLATE),
    ("post_header.html", POST_HEADER_TEMPLATE),
    ("blog_list.html", BLOG_LIST_TEMPLATE),
    ("blog_post.html", BLOG_POST_TEMPLATE),
    ("blog_tags.html", BLOG_TAGS_TEMPLATE),
];

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="{{ site.lang }}" data-theme="{{ site.color_mode.default_mode }}">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{% if page.title and page.title != site.title %}{{ page.title }} | {% endif %}{{ site.title }}</title>
  {% if page.description %}<meta name="description" content="{{ page.description }}">
  {% endif %}{% if site.image %}<meta property="og:image" content="{{ site.image | attr }}">
  {% endif %}{% if site.favicon %}<link rel="icon" href="{{ site.favicon | attr }}">
  {% endif %}{% for feed in site.feeds %}<link rel="alternate" type="{{ feed.mime }}" title="{{ feed.title }}" href="{{ feed.href | attr }}">
  {% endfor %}<link rel="stylesheet" href="{{ site.base_url | attr }}assets/main.css">
  <script>
    (function() {
      var mode = '{{ site.color_mode.default_mode }}';
      {% if not site.color_mode.disable_switch %}var stored = null;
      try { stored = localStorage.getItem('theme'); } catch (e) {}
      if (stored === 'light' || stored === 'dark') {
        mode = stored;
      }{% if site.color_mode.respect_prefers_color_scheme %} else if (window.matchMedia) {
        mode = window.matchMedia('(prefers-color-scheme: dark)').matches ? 'dark' : 'light';
      }{% endif %}{% endif %}
      document.documentElement.setAttribute('data-theme', mode);
    })();
  </script>
</head>
<body data-prism-theme="{{ site.prism_theme }}" data-prism-dark-theme="{{ site.prism_dark_theme }}">
  {% include "navbar.html" %}
  <div class="main-wrapper">
    {% block content %}{% endblock %}
  </div>
  {% include "footer.html" %}
  <script src="{{ site.base_url | attr }}assets/main.js"></script>
  {% if site.live_reload %}<script src="{{ site.live_reload | attr }}"></script>{% endif %}
</body>
</html>"##;

const NAVBAR_TEMPLATE: &str = r##"<nav class="navbar navbar--{{ site.navbar.style }}">
  <div class="navbar__inner">
    <div class="navbar__items">
      {% if site.sidebar_hideable %}<button type="button" class="navbar__sidebar-toggle" aria-label="Toggle sidebar">&#9776;</button>{% endif %}
      <a class="navbar__brand" href="{{ site.base_url | attr }}">
        {% if site.navbar.logo %}<img class="navbar__logo" src="{{ site.navbar.logo.src | attr }}" alt="{{ site.navbar.logo.alt }}">{% endif %}
        {% if site.navbar.title %}<b class="navbar__title">{{ site.navbar.title }}</b>{% endif %}
      </a>
      {% for item in site.navbar.left %}
      <a class="navbar__item navbar__link" href="{{ item.href | attr }}"{% if item.external %} target="_blank" rel="noopener noreferrer"{% endif %}>{{ item.label }}</a>
      {% endfor %}
    </div>
    <div class="navbar__items navbar__items--right">
      {% for item in site.navbar.right %}
      <a class="navbar__item navbar__link" href="{{ item.href | attr }}"{% if item.external %} target="_blank" rel="noopener noreferrer"{% endif %}>{{ item.label }}</a>
      {% endfor %}
      {% if not site.color_mode.disable_switch %}<button type="button" class="color-mode-toggle" aria-label="Switch between dark and light mode">&#9680;</button>{% endif %}
    </div>
  </div>
</nav>"##;

const FOOTER_TEMPLATE: &str = r##"<footer class="footer footer--{{ site.footer.style }}">
  {% if site.footer.copyright %}<div class="footer__copyright">{{ site.footer.copyright }}</div>{% endif %}
</footer>"##;

const SIDEBAR_TEMPLATE: &str = r##"<aside class="doc-sidebar{% if site.auto_collapse_categories %} auto-collapse{% endif %}">
  <ul class="menu__list">
  {% for item in page.sidebar recursive %}
    <li class="menu__list-item{% if item.children %} menu__category{% if item.collapsed %} menu__list-item--collapsed{% endif %}{% endif %}{% if item.active %} active{% endif %}">
      {% if item.path %}<a class="menu__link{% if item.active %} menu__link--active{% endif %}" href="{{ item.path | attr }}"{% if item.external %} target="_blank" rel="noopener noreferrer"{% endif %}>{{ item.title }}</a>{% else %}<span class="menu__link menu__caret">{{ item.title }}</span>{% endif %}
      {% if item.children %}<ul class="menu__list">{{ loop(item.children) }}</ul>{% endif %}
    </li>
  {% endfor %}
  </ul>
</aside>"##;

const TOC_TEMPLATE: &str = r##"{% if page.toc %}
<aside class="toc">
  <h2>On this page</h2>
  <ul>
  {% for entry in page.toc %}{% if entry.level > 1 %}
    <li class="toc-level-{{ entry.level }}"><a href="#{{ entry.id }}">{{ entry.title }}</a></li>
  {% endif %}{% endfor %}
  </ul>
</aside>
{% endif %}"##;

const DOC_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<div class="doc-layout">
  {% if page.sidebar %}{% include "sidebar.html" %}{% endif %}
  <main class="doc-main">
    <article class="markdown">
      {{ page.content | safe }}
    </article>
    {% if page.previous or page.next %}
    <nav class="pagination-nav">
      {% if page.previous %}<a class="pagination-nav__link pagination-nav__link--prev" href="{{ page.previous.href | attr }}"><span class="pagination-nav__sublabel">Previous</span>{{ page.previous.title }}</a>{% endif %}
      {% if page.next %}<a class="pagination-nav__link pagination-nav__link--next" href="{{ page.next.href | attr }}"><span class="pagination-nav__sublabel">Next</span>{{ page.next.title }}</a>{% endif %}
    </nav>
    {% endif %}
  </main>
  {% include "toc.html" %}
</div>
{% endblock %}"##;

const PAGE_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<div class="page-layout">
  <main class="page-main">
    <article class="markdown">
      {{ page.content | safe }}
    </article>
  </main>
  {% include "toc.html" %}
</div>
{% endblock %}"##;

const HOME_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<header class="hero hero--primary">
  <div class="container">
    <h1 class="hero__title">{{ page.title }}</h1>
    {% if page.tagline %}<p class="hero__subtitle">{{ page.tagline }}</p>{% endif %}
  </div>
</header>
<main>
  {% with grid = page.grid %}{% include "features.html" %}{% endwith %}
</main>
{% endblock %}"##;

const FEATURES_TEMPLATE: &str = r##"<section class="features">
  <div class="container">
    <div class="row">
    {% for cell in grid.cells %}
      <div class="feature col {{ grid.col_class }}" style="flex: 0 0 {{ grid.basis }}; max-width: {{ grid.basis }};">
        <div class="text--center">
          <a class="feature__icon" href="{{ cell.href | attr }}"><img class="feature__svg" src="{{ cell.icon_src | attr }}" alt="" role="img"></a>
        </div>
        <div class="text--center padding-horiz--md">
          <h3><a href="{{ cell.href | attr }}">{{ cell.title }}</a></h3>
          <p class="feature-description">{{ cell.description_html | safe }}</p>
        </div>
      </div>
    {% endfor %}
    </div>
  </div>
</section>"##;

const POST_HEADER_TEMPLATE: &str = r##"<header class="blog-post__header">
  <h2 class="blog-post__title"><a href="{{ post.href | attr }}">{{ post.title }}</a></h2>
  <div class="blog-post__meta">
    <time datetime="{{ post.date_iso }}">{{ post.date }}</time>{% if post.reading_minutes %} · {{ post.reading_minutes }} min read{% endif %}
  </div>
  {% if post.authors %}<div class="blog-post__authors">
    {% for author in post.authors %}<div class="avatar">
      {% if author.image_url %}<img class="avatar__photo" src="{{ author.image_url | attr }}" alt="{{ author.name }}">{% endif %}
      <div class="avatar__intro">{% if author.url %}<a href="{{ author.url | attr }}" target="_blank" rel="noopener noreferrer">{{ author.name }}</a>{% else %}{{ author.name }}{% endif %}{% if author.title %}<small class="avatar__subtitle">{{ author.title }}</small>{% endif %}</div>
    </div>{% endfor %}
  </div>{% endif %}
</header>"##;

const BLOG_LIST_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<main class="blog-main">
  <h1>{{ page.heading }}</h1>
  {% for post in page.posts %}
  <article class="blog-post">
    {% include "post_header.html" %}
    <div class="markdown">{{ post.content | safe }}</div>
    {% if post.tags %}<ul class="blog-post__tags">{% for tag in post.tags %}<li><a class="tag" href="{{ tag.href | attr }}">{{ tag.title }}</a></li>{% endfor %}</ul>{% endif %}
    {% if post.truncated %}<a class="blog-post__more" href="{{ post.href | attr }}">Read more</a>{% endif %}
  </article>
  {% else %}
  <p>No posts yet.</p>
  {% endfor %}
  {% if page.newer or page.older %}
  <nav class="pagination-nav">
    {% if page.newer %}<a class="pagination-nav__link" href="{{ page.newer | attr }}">Newer entries</a>{% endif %}
    {% if page.older %}<a class="pagination-nav__link" href="{{ page.older | attr }}">Older entries</a>{% endif %}
  </nav>
  {% endif %}
</main>
{% endblock %}"##;

const BLOG_POST_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<div class="page-layout">
  <main class="blog-main">
    {% with post = page.post %}
    <article class="blog-post">
      {% include "post_header.html" %}
      <div class="markdown">{{ post.content | safe }}</div>
      {% if post.tags %}<ul class="blog-post__tags">{% for tag in post.tags %}<li><a class="tag" href="{{ tag.href | attr }}">{{ tag.title }}</a></li>{% endfor %}</ul>{% endif %}
    </article>
    {% endwith %}
    {% if page.previous or page.next %}
    <nav class="pagination-nav">
      {% if page.previous %}<a class="pagination-nav__link" href="{{ page.previous.href | attr }}"><span class="pagination-nav__sublabel">Newer post</span>{{ page.previous.title }}</a>{% endif %}
      {% if page.next %}<a class="pagination-nav__link" href="{{ page.next.href | attr }}"><span class="pagination-nav__sublabel">Older post</span>{{ page.next.title }}</a>{% endif %}
    </nav>
    {% endif %}
  </main>
  {% include "toc.html" %}
</div>
{% endblock %}"##;

const BLOG_TAGS_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<main class="blog-main">
  <h1>Tags</h1>
  <ul class="tag-list">
  {% for tag in page.tags %}
    <li><a class="tag" href="{{ tag.href | attr }}">{{ tag.label }}</a> ({{ tag.count }})</li>
  {% endfor %}
  </ul>
</main>
{% endblock %}"##;

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn site() -> SiteContext {
        SiteContext {
            title: "Xceed documentation".to_string(),
            tagline: "Xceed Libraries for .NET documentation".to_string(),
            base_url: "/".to_string(),
            lang: "en".to_string(),
            favicon: Some("/img/logox.ico".to_string()),
            image: None,
            navbar: NavbarContext {
                title: Some("Xceed documentation center".to_string()),
                logo: None,
                style: "primary".to_string(),
                left: vec![NavbarLink {
                    label: "Workbooks for .NET".to_string(),
                    href: "/workbooks/intro".to_string(),
                    external: false,
                }],
                right: vec![NavbarLink {
                    label: "GitHub".to_string(),
                    href: "https://github.com/xceedsoftware".to_string(),
                    external: true,
                }],
            },
            footer: FooterContext {
                style: "dark".to_string(),
                copyright: Some("All rights reserved 2020 - 2026".to_string()),
            },
            color_mode: ColorModeContext {
                default_mode: "dark".to_string(),
                disable_switch: false,
                respect_prefers_color_scheme: true,
            },
            prism_theme: "github".to_string(),
            prism_dark_theme: "dracula".to_string(),
            sidebar_hideable: true,
            auto_collapse_categories: false,
            feeds: vec![],
            live_reload: None,
        }
    }

    fn doc(sidebar: Vec<NavItem>) -> DocContext {
        DocContext {
            title: "Introduction".to_string(),
            description: None,
            content: "<p>Hello world</p>".to_string(),
            toc: vec![TocEntry {
                title: "Usage".to_string(),
                id: "usage".to_string(),
                level: 2,
            }],
            sidebar,
            previous: None,
            next: Some(PageLink {
                title: "Saving".to_string(),
                href: "/docs/save".to_string(),
            }),
        }
    }

    #[test]
    fn renders_doc_page() {
        let engine = TemplateEngine::new();

        let html = engine.render("doc.html", &site(), &doc(vec![])).unwrap();

        assert!(html.contains("<title>Introduction | Xceed documentation</title>"));
        assert!(html.contains("<p>Hello world</p>"));
        assert!(html.contains("href=\"#usage\""));
        assert!(html.contains("href=\"/docs/save\""));
        assert!(html.contains("data-theme=\"dark\""));
    }

    #[test]
    fn renders_navbar_and_footer() {
        let engine = TemplateEngine::new();

        let html = engine.render("doc.html", &site(), &doc(vec![])).unwrap();

        assert!(html.contains("href=\"/workbooks/intro\""));
        assert!(html.contains("target=\"_blank\""));
        assert!(html.contains("All rights reserved 2020 - 2026"));
        assert!(html.contains("color-mode-toggle"));
    }

    #[test]
    fn hides_color_switch_when_disabled() {
        let engine = TemplateEngine::new();
        let mut site = site();
        site.color_mode.disable_switch = true;

        let html = engine.render("doc.html", &site, &doc(vec![])).unwrap();

        assert!(!html.contains("color-mode-toggle"));
        assert!(!html.contains("localStorage"));
    }

    #[test]
    fn renders_nested_sidebar() {
        let engine = TemplateEngine::new();
        let sidebar = vec![
            NavItem {
                title: "Introduction".to_string(),
                path: "/docs/intro".to_string(),
                route: "/docs/intro".to_string(),
                active: true,
                ..Default::default()
            },
            NavItem {
                title: "Guides".to_string(),
                collapsed: true,
                children: vec![NavItem {
                    title: "Saving".to_string(),
                    path: "/docs/guides/save".to_string(),
                    route: "/docs/guides/save".to_string(),
                    ..Default::default()
                }],
                ..Default::default()
            },
        ];

        let html = engine.render("doc.html", &site(), &doc(sidebar)).unwrap();

        assert!(html.contains("menu__link--active"));
        assert!(html.contains("menu__list-item--collapsed"));
        assert!(html.contains("href=\"/docs/guides/save\""));
    }

    #[test]
    fn escapes_attribute_values() {
        let engine = TemplateEngine::new();
        let mut site = site();
        site.navbar.left[0].href = "/a\"b".to_string();

        let html = engine.render("doc.html", &site, &doc(vec![])).unwrap();

        assert!(html.contains("href=\"/a&quot;b\""));
    }
}
