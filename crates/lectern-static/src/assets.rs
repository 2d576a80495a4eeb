//! Asset pipeline for CSS, JavaScript and static files.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::builder::BuildError;

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the main CSS file.
    pub fn generate_css() -> String {
        DEFAULT_CSS.to_string()
    }

    /// Generate the main JavaScript file.
    pub fn generate_js() -> String {
        DEFAULT_JS.to_string()
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }

    /// The site stylesheet: the theme followed by every custom stylesheet.
    pub fn bundle_css(custom_css: &[PathBuf], minify: bool) -> Result<String, BuildError> {
        let mut css = Self::generate_css();

        for path in custom_css {
            let custom = fs::read_to_string(path).map_err(|e| {
                BuildError::ReadError(format!("Failed to read stylesheet {}: {}", path.display(), e))
            })?;
            css.push('\n');
            css.push_str(&custom);
            tracing::debug!("Appended stylesheet {}", path.display());
        }

        if !minify {
            return Ok(css);
        }

        match Self::minify_css(&css) {
            Ok(minified) => Ok(minified),
            Err(e) => {
                tracing::warn!("Serving unminified CSS: {}", e);
                Ok(css)
            }
        }
    }

    /// Copy the static directory into the output root, returning the file count.
    pub fn copy_static(static_dir: &Path, output_dir: &Path) -> Result<usize, BuildError> {
        if !static_dir.is_dir() {
            return Ok(0);
        }

        let mut count = 0;
        for entry in WalkDir::new(static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let relative = entry.path().strip_prefix(static_dir).unwrap_or(entry.path());
            let target = output_dir.join(relative);

            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
            }
            fs::copy(entry.path(), &target).map_err(|e| {
                BuildError::WriteError(format!("{}: {}", entry.path().display(), e))
            })?;
            count += 1;
        }

        tracing::debug!("Copied {} static file(s) from {}", count, static_dir.display());
        Ok(count)
    }
}

const DEFAULT_CSS: &str = r#"/* lectern classic theme */

:root {
  --ifm-color-primary: #1e6fd9;
  --ifm-color-primary-dark: #1a64c3;
  --ifm-background-color: #ffffff;
  --ifm-font-color-base: #1c1e21;
  --ifm-color-emphasis-200: #ebedf0;
  --ifm-color-emphasis-600: #606770;
  --ifm-navbar-height: 3.75rem;
  --ifm-navbar-background: #ffffff;
  --ifm-footer-background: #303846;
  --ifm-footer-color: #ebedf0;
  --ifm-code-background: #f6f7f8;
  --ifm-code-highlight: rgba(0, 0, 0, 0.1);
  --doc-sidebar-width: 300px;
  --toc-width: 240px;
  --content-max-width: 860px;
}

[data-theme='dark'] {
  --ifm-color-primary: #5fa8ff;
  --ifm-color-primary-dark: #3b93ff;
  --ifm-background-color: #1b1b1d;
  --ifm-font-color-base: #e3e3e3;
  --ifm-color-emphasis-200: #2e2e30;
  --ifm-color-emphasis-600: #a0a4ab;
  --ifm-navbar-background: #242526;
  --ifm-footer-background: #242526;
  --ifm-code-background: #282a36;
  --ifm-code-highlight: rgba(255, 255, 255, 0.1);
}

* {
  box-sizing: border-box;
}

body {
  margin: 0;
  font-family: system-ui, -apple-system, 'Segoe UI', Roboto, sans-serif;
  background: var(--ifm-background-color);
  color: var(--ifm-font-color-base);
  line-height: 1.65;
}

a {
  color: var(--ifm-color-primary);
  text-decoration: none;
}

a:hover {
  text-decoration: underline;
}

.container {
  max-width: 1140px;
  margin: 0 auto;
  padding: 0 1rem;
}

/* Navbar */
.navbar {
  position: sticky;
  top: 0;
  z-index: 10;
  height: var(--ifm-navbar-height);
  background: var(--ifm-navbar-background);
  border-bottom: 1px solid var(--ifm-color-emphasis-200);
}

.navbar--dark {
  --ifm-navbar-background: #242526;
  color: #ebedf0;
}

.navbar__inner {
  display: flex;
  justify-content: space-between;
  align-items: center;
  height: 100%;
  padding: 0 1rem;
}

.navbar__items {
  display: flex;
  align-items: center;
  gap: 1rem;
}

.navbar__brand {
  display: flex;
  align-items: center;
  gap: 0.5rem;
  color: inherit;
}

.navbar__logo {
  height: 2rem;
}

.navbar__link {
  color: inherit;
  font-weight: 500;
}

.navbar__sidebar-toggle,
.color-mode-toggle {
  background: none;
  border: none;
  color: inherit;
  font-size: 1.25rem;
  cursor: pointer;
}

/* Docs layout */
.doc-layout,
.page-layout {
  display: flex;
  align-items: flex-start;
  min-height: calc(100vh - var(--ifm-navbar-height));
}

.doc-sidebar {
  position: sticky;
  top: var(--ifm-navbar-height);
  flex: 0 0 var(--doc-sidebar-width);
  max-height: calc(100vh - var(--ifm-navbar-height));
  overflow-y: auto;
  padding: 1rem 0.5rem;
  border-right: 1px solid var(--ifm-color-emphasis-200);
}

body.sidebar-hidden .doc-sidebar {
  display: none;
}

.menu__list {
  list-style: none;
  margin: 0;
  padding-left: 0.75rem;
}

.menu__link {
  display: block;
  padding: 0.3rem 0.75rem;
  border-radius: 0.25rem;
  color: var(--ifm-color-emphasis-600);
}

.menu__link--active {
  color: var(--ifm-color-primary);
  background: var(--ifm-color-emphasis-200);
}

.menu__caret {
  cursor: pointer;
  font-weight: 600;
}

.menu__list-item--collapsed > .menu__list {
  display: none;
}

.doc-main,
.page-main,
.blog-main {
  flex: 1;
  min-width: 0;
  max-width: var(--content-max-width);
  margin: 0 auto;
  padding: 2rem 1.5rem;
}

.toc {
  position: sticky;
  top: calc(var(--ifm-navbar-height) + 1rem);
  flex: 0 0 var(--toc-width);
  padding: 1rem;
  font-size: 0.85rem;
}

.toc h2 {
  font-size: 0.75rem;
  text-transform: uppercase;
}

.toc ul {
  list-style: none;
  padding: 0;
}

.toc-level-3 {
  padding-left: 1rem;
}

.pagination-nav {
  display: flex;
  justify-content: space-between;
  gap: 1rem;
  margin-top: 3rem;
}

.pagination-nav__link {
  flex: 1;
  padding: 1rem;
  border: 1px solid var(--ifm-color-emphasis-200);
  border-radius: 0.4rem;
}

.pagination-nav__link--next {
  text-align: right;
}

.pagination-nav__sublabel {
  display: block;
  font-size: 0.8rem;
  color: var(--ifm-color-emphasis-600);
}

/* Markdown */
.markdown h1,
.markdown h2,
.markdown h3 {
  line-height: 1.25;
}

.markdown table {
  border-collapse: collapse;
}

.markdown th,
.markdown td {
  padding: 0.5rem 0.75rem;
  border: 1px solid var(--ifm-color-emphasis-200);
}

.markdown code {
  padding: 0.1rem 0.3rem;
  border-radius: 0.25rem;
  background: var(--ifm-code-background);
  font-size: 0.9em;
}

/* Code blocks */
.code-block {
  position: relative;
  margin-bottom: 1.25rem;
  border-radius: 0.4rem;
  background: var(--ifm-code-background);
}

.code-block-title {
  padding: 0.5rem 1rem;
  font-size: 0.85rem;
  font-weight: 600;
  border-bottom: 1px solid var(--ifm-color-emphasis-200);
}

.code-block pre {
  margin: 0;
  padding: 1rem;
  overflow-x: auto;
}

.code-block pre code {
  padding: 0;
  background: none;
}

.token-line {
  display: block;
}

.token-line.highlighted {
  margin: 0 -1rem;
  padding: 0 1rem;
  background: var(--ifm-code-highlight);
}

.copy-btn {
  position: absolute;
  top: 0.5rem;
  right: 0.5rem;
  padding: 0.2rem 0.5rem;
  font-size: 0.75rem;
  border: 1px solid var(--ifm-color-emphasis-200);
  border-radius: 0.25rem;
  background: var(--ifm-background-color);
  color: inherit;
  cursor: pointer;
  opacity: 0;
}

.code-block:hover .copy-btn {
  opacity: 1;
}

/* Homepage */
.hero {
  padding: 4rem 0;
  text-align: center;
}

.hero--primary {
  background: var(--ifm-color-primary);
  color: #ffffff;
}

.hero__title {
  font-size: 3rem;
  margin: 0;
}

.hero__subtitle {
  font-size: 1.5rem;
}

/* Feature grid */
.features {
  display: flex;
  align-items: center;
  width: 100%;
  padding: 2rem 0;
}

.row {
  display: flex;
  flex-wrap: wrap;
  margin: 0 -1rem;
}

.col {
  flex: 1 0 0;
  max-width: 100%;
  padding: 0 1rem;
}

.col--2 { flex: 0 0 16.6667%; max-width: 16.6667%; }
.col--3 { flex: 0 0 25%; max-width: 25%; }
.col--4 { flex: 0 0 33.3333%; max-width: 33.3333%; }
.col--6 { flex: 0 0 50%; max-width: 50%; }
.col--12 { flex: 0 0 100%; max-width: 100%; }

.feature {
  margin-bottom: 2rem;
}

.text--center {
  text-align: center;
}

.padding-horiz--md {
  padding: 0 1rem;
}

.feature__svg {
  width: 200px;
  height: 200px;
}

@media (max-width: 996px) {
  .feature.col {
    flex: 0 0 100% !important;
    max-width: 100% !important;
  }

  .doc-sidebar,
  .toc {
    display: none;
  }
}

/* Blog */
.blog-post {
  margin-bottom: 3rem;
}

.blog-post__meta {
  color: var(--ifm-color-emphasis-600);
  font-size: 0.9rem;
}

.blog-post__authors {
  display: flex;
  gap: 1rem;
  margin: 1rem 0;
}

.avatar {
  display: flex;
  align-items: center;
  gap: 0.5rem;
}

.avatar__photo {
  width: 2.5rem;
  height: 2.5rem;
  border-radius: 50%;
}

.avatar__subtitle {
  display: block;
  color: var(--ifm-color-emphasis-600);
}

.blog-post__tags,
.tag-list {
  display: flex;
  flex-wrap: wrap;
  gap: 0.5rem;
  list-style: none;
  padding: 0;
}

.tag {
  padding: 0.1rem 0.6rem;
  border: 1px solid var(--ifm-color-emphasis-200);
  border-radius: 1rem;
  font-size: 0.85rem;
}

/* Footer */
.footer {
  padding: 2rem 1rem;
  text-align: center;
}

.footer--dark {
  background: var(--ifm-footer-background);
  color: var(--ifm-footer-color);
}
"#;

const DEFAULT_JS: &str = r#"// lectern runtime
(function() {
  'use strict';

  var root = document.documentElement;

  // Color mode toggle
  var toggle = document.querySelector('.color-mode-toggle');
  if (toggle) {
    toggle.addEventListener('click', function() {
      var next = root.getAttribute('data-theme') === 'dark' ? 'light' : 'dark';
      root.setAttribute('data-theme', next);
      try { localStorage.setItem('theme', next); } catch (e) {}
    });
  }

  // Hideable sidebar
  var sidebarToggle = document.querySelector('.navbar__sidebar-toggle');
  if (sidebarToggle) {
    if (localStorage.getItem('sidebar-hidden') === 'true') {
      document.body.classList.add('sidebar-hidden');
    }
    sidebarToggle.addEventListener('click', function() {
      var hidden = document.body.classList.toggle('sidebar-hidden');
      try { localStorage.setItem('sidebar-hidden', String(hidden)); } catch (e) {}
    });
  }

  // Sidebar categories
  var sidebar = document.querySelector('.doc-sidebar');
  document.querySelectorAll('.menu__category > .menu__caret').forEach(function(caret) {
    caret.addEventListener('click', function() {
      var item = caret.parentElement;
      var opening = item.classList.contains('menu__list-item--collapsed');
      if (opening && sidebar && sidebar.classList.contains('auto-collapse')) {
        item.parentElement.querySelectorAll(':scope > .menu__category').forEach(function(sibling) {
          if (sibling !== item) sibling.classList.add('menu__list-item--collapsed');
        });
      }
      item.classList.toggle('menu__list-item--collapsed');
    });
  });

  // Copy code button
  document.querySelectorAll('.code-block').forEach(function(block) {
    if (block.querySelector('.copy-btn')) return;

    var btn = document.createElement('button');
    btn.className = 'copy-btn';
    btn.textContent = 'Copy';
    btn.setAttribute('type', 'button');

    btn.addEventListener('click', function() {
      var code = block.querySelector('code');
      var text = code ? code.textContent : '';
      navigator.clipboard.writeText(text || '').then(function() {
        btn.textContent = 'Copied!';
        setTimeout(function() { btn.textContent = 'Copy'; }, 2000);
      }, function() {
        btn.textContent = 'Error';
        setTimeout(function() { btn.textContent = 'Copy'; }, 2000);
      });
    });

    block.appendChild(btn);
  });
})();
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn generates_css() {
        let css = AssetPipeline::generate_css();
        assert!(css.contains(":root"));
        assert!(css.contains("[data-theme='dark']"));
        assert!(css.contains(".col--6"));
    }

    #[test]
    fn generates_js() {
        let js = AssetPipeline::generate_js();
        assert!(js.contains("localStorage"));
        assert!(js.contains("sidebar-hidden"));
        assert!(js.contains("clipboard"));
    }

    #[test]
    fn minifies_css() {
        let css = r#"
.button {
    background-color: blue;
    padding: 10px;
}
        "#;

        let minified = AssetPipeline::minify_css(css).unwrap();

        assert!(!minified.contains('\n'));
        assert!(minified.contains(".button"));
    }

    #[test]
    fn appends_custom_css() {
        let temp = tempdir().unwrap();
        let custom = temp.path().join("custom.css");
        fs::write(&custom, ".hero--primary { --brand: #ff6600; }").unwrap();

        let css = AssetPipeline::bundle_css(&[custom], false).unwrap();
        assert!(css.ends_with(".hero--primary { --brand: #ff6600; }"));

        let missing = AssetPipeline::bundle_css(&[temp.path().join("missing.css")], false);
        assert!(missing.is_err());
    }

    #[test]
    fn copies_static_tree() {
        let temp = tempdir().unwrap();
        let static_dir = temp.path().join("static");
        let out = temp.path().join("build");
        fs::create_dir_all(static_dir.join("img")).unwrap();
        fs::write(static_dir.join("img/logox.ico"), [0u8, 1, 2]).unwrap();
        fs::write(static_dir.join(".nojekyll"), "").unwrap();

        let count = AssetPipeline::copy_static(&static_dir, &out).unwrap();

        assert_eq!(count, 2);
        assert!(out.join("img/logox.ico").exists());
        assert!(out.join(".nojekyll").exists());
    }
}
