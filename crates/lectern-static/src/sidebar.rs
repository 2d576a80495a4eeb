//! Resolving sidebar definitions into navigation trees.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use lectern_config::{SidebarEntry, SidebarItem, Sidebars};

use crate::builder::BuildError;
use crate::content::DocPage;
use crate::links::LinkRecord;
use crate::templates::{NavItem, PageLink};

/// One sidebar with its items resolved to pages.
#[derive(Debug, Clone)]
pub struct ResolvedSidebar {
    pub section_id: String,
    pub id: String,
    pub items: Vec<NavItem>,
}

/// Every resolved sidebar of the site, indexed by the routes they list.
#[derive(Debug, Default)]
pub struct SidebarSet {
    sidebars: Vec<ResolvedSidebar>,
    by_route: HashMap<String, usize>,
    links: Vec<LinkRecord>,
}

impl SidebarSet {
    /// Resolve the sidebars of each section against its docs.
    pub fn resolve(
        sidebars: &BTreeMap<String, Sidebars>,
        docs: &[DocPage],
        base_url: &str,
    ) -> Result<Self, BuildError> {
        let mut set = Self::default();

        for (section_id, section_sidebars) in sidebars {
            let section_docs: Vec<&DocPage> =
                docs.iter().filter(|d| &d.section_id == section_id).collect();

            for (sidebar_id, items) in section_sidebars.iter() {
                let mut resolver = Resolver {
                    section_id,
                    sidebar_id,
                    docs: &section_docs,
                    base_url,
                    links: &mut set.links,
                };
                let items = resolver.items(items)?;

                let index = set.sidebars.len();
                for route in routes_of(&items) {
                    // A doc listed by two sidebars keeps the first.
                    set.by_route.entry(route).or_insert(index);
                }

                set.sidebars.push(ResolvedSidebar {
                    section_id: section_id.clone(),
                    id: sidebar_id.to_string(),
                    items,
                });
            }
        }

        Ok(set)
    }

    /// Route of the first doc a sidebar lists.
    pub fn first_doc_route(&self, section_id: &str, sidebar_id: &str) -> Option<String> {
        self.sidebars
            .iter()
            .find(|s| s.section_id == section_id && s.id == sidebar_id)
            .and_then(|s| routes_of(&s.items).into_iter().next())
    }

    /// Sidebar shown on the page at `route`, with the page marked active.
    pub fn for_route(&self, route: &str) -> Vec<NavItem> {
        self.by_route
            .get(route)
            .map(|&index| {
                let mut items = self.sidebars[index].items.clone();
                mark_active(&mut items, route);
                items
            })
            .unwrap_or_default()
    }

    /// Previous and next doc in sidebar order.
    pub fn pagination(&self, route: &str) -> (Option<PageLink>, Option<PageLink>) {
        let Some(&index) = self.by_route.get(route) else {
            return (None, None);
        };

        let mut flat = Vec::new();
        flatten(&self.sidebars[index].items, &mut flat);

        let Some(pos) = flat.iter().position(|item| item.route == route) else {
            return (None, None);
        };

        let link = |item: &NavItem| PageLink {
            title: item.title.clone(),
            href: item.path.clone(),
        };
        let previous = pos.checked_sub(1).map(|i| link(flat[i]));
        let next = flat.get(pos + 1).map(|&item| link(item));
        (previous, next)
    }

    /// Internal `link` entries, for the link checker.
    pub fn links(&self) -> &[LinkRecord] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.sidebars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sidebars.is_empty()
    }
}

struct Resolver<'a> {
    section_id: &'a str,
    sidebar_id: &'a str,
    docs: &'a [&'a DocPage],
    base_url: &'a str,
    links: &'a mut Vec<LinkRecord>,
}

impl Resolver<'_> {
    fn items(&mut self, items: &[SidebarItem]) -> Result<Vec<NavItem>, BuildError> {
        let mut resolved = Vec::new();

        for item in items {
            match item {
                SidebarItem::Doc(id) => resolved.push(self.doc(id, None)?),
                SidebarItem::Entry(SidebarEntry::Doc { id, label }) => {
                    resolved.push(self.doc(id, label.as_deref())?)
                }
                SidebarItem::Entry(SidebarEntry::Autogenerated { dir }) => {
                    resolved.extend(self.autogenerated(dir))
                }
                SidebarItem::Entry(SidebarEntry::Category {
                    label,
                    items,
                    collapsed,
                }) => resolved.push(NavItem {
                    title: label.clone(),
                    children: self.items(items)?,
                    collapsed: collapsed.unwrap_or(true),
                    ..Default::default()
                }),
                SidebarItem::Entry(SidebarEntry::Link { href, label }) => {
                    resolved.push(self.link(href, label))
                }
            }
        }

        Ok(resolved)
    }

    fn doc(&self, id: &str, label: Option<&str>) -> Result<NavItem, BuildError> {
        let doc = self
            .docs
            .iter()
            .find(|d| d.id == id)
            .ok_or_else(|| BuildError::UnknownDoc {
                section: self.section_id.to_string(),
                sidebar: self.sidebar_id.to_string(),
                id: id.to_string(),
            })?;

        let mut item = doc_item(doc, self.base_url);
        if let Some(label) = label {
            item.title = label.to_string();
        }
        Ok(item)
    }

    fn link(&mut self, href: &str, label: &str) -> NavItem {
        let external = url::Url::parse(href).is_ok();
        if !external {
            self.links.push(LinkRecord::new(
                format!("sidebar {}/{}", self.section_id, self.sidebar_id),
                "/",
                href,
            ));
        }

        NavItem {
            title: label.to_string(),
            path: if external {
                href.to_string()
            } else {
                format!("{}{}", self.base_url, href.trim_start_matches('/'))
            },
            external,
            ..Default::default()
        }
    }

    /// Docs under `dir`, subdirectories as categories.
    fn autogenerated(&self, dir: &str) -> Vec<NavItem> {
        let dir = dir.trim_matches('/').trim_start_matches("./");
        let dir = if dir == "." { "" } else { dir };
        autogenerate(self.docs, dir, self.base_url)
    }
}

fn autogenerate(docs: &[&DocPage], dir: &str, base_url: &str) -> Vec<NavItem> {
    // (position, name, item)
    let mut entries: Vec<(f64, String, NavItem)> = Vec::new();
    let mut subdirs = BTreeSet::new();

    for doc in docs {
        let doc_dir = doc.dir();
        if doc_dir == dir {
            entries.push((
                doc.position.unwrap_or(f64::MAX),
                doc.stem().to_string(),
                doc_item(doc, base_url),
            ));
        } else if let Some(rest) = child_path(&doc_dir, dir) {
            let name = rest.split('/').next().unwrap_or(rest);
            subdirs.insert(name.to_string());
        }
    }

    for name in &subdirs {
        let path = if dir.is_empty() {
            name.clone()
        } else {
            format!("{}/{}", dir, name)
        };

        let mut children = autogenerate(docs, &path, base_url);

        // A category index doc becomes the category's own page.
        let index = docs.iter().find(|d| d.dir() == path && d.is_index());
        let (position, category_path, category_route) = match index {
            Some(doc) => {
                children.retain(|c| c.route != doc.route);
                (
                    doc.position.unwrap_or(f64::MAX),
                    format!("{}{}", base_url, doc.route.trim_start_matches('/')),
                    doc.route.clone(),
                )
            }
            None => (f64::MAX, String::new(), String::new()),
        };

        entries.push((
            position,
            name.clone(),
            NavItem {
                title: capitalize(name),
                path: category_path,
                route: category_route,
                children,
                collapsed: true,
                ..Default::default()
            },
        ));
    }

    entries.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    entries.into_iter().map(|(_, _, item)| item).collect()
}

/// `guides/advanced` under `guides` -> `Some("advanced")`.
fn child_path<'a>(path: &'a str, dir: &str) -> Option<&'a str> {
    if dir.is_empty() {
        return (!path.is_empty()).then_some(path);
    }
    path.strip_prefix(dir)?.strip_prefix('/')
}

fn doc_item(doc: &DocPage, base_url: &str) -> NavItem {
    NavItem {
        title: doc.sidebar_label.clone(),
        path: format!("{}{}", base_url, doc.route.trim_start_matches('/')),
        route: doc.route.clone(),
        ..Default::default()
    }
}

fn routes_of(items: &[NavItem]) -> Vec<String> {
    let mut flat = Vec::new();
    flatten(items, &mut flat);
    flat.into_iter().map(|item| item.route.clone()).collect()
}

/// Items with a page, depth first.
fn flatten<'a>(items: &'a [NavItem], out: &mut Vec<&'a NavItem>) {
    for item in items {
        if !item.route.is_empty() {
            out.push(item);
        }
        flatten(&item.children, out);
    }
}

/// Mark the item at `route` active and unfold its ancestors.
pub fn mark_active(items: &mut [NavItem], route: &str) -> bool {
    let mut found = false;
    for item in items.iter_mut() {
        let child_active = mark_active(&mut item.children, route);
        if item.route == route {
            item.active = true;
        }
        if child_active || item.active {
            item.collapsed = false;
            found = true;
        }
    }
    found
}

/// Capitalize first letter of a string.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lectern_mdx::parse_markdown;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn page(section: &str, relative: &str, route: &str, position: Option<f64>) -> DocPage {
        let id = relative.trim_end_matches(".md").to_string();
        let label = id.rsplit('/').next().unwrap_or(&id).to_string();
        DocPage {
            section_id: section.to_string(),
            id,
            source_path: PathBuf::from(relative),
            relative_path: PathBuf::from(relative),
            route: route.to_string(),
            title: label.clone(),
            sidebar_label: label,
            position,
            doc: parse_markdown("").unwrap(),
        }
    }

    fn docs() -> Vec<DocPage> {
        vec![
            page("default", "intro.md", "/docs/intro", Some(1.0)),
            page("default", "guides/index.md", "/docs/guides", None),
            page("default", "guides/save.md", "/docs/guides/save", Some(2.0)),
            page("default", "guides/load.md", "/docs/guides/load", Some(1.0)),
            page("default", "faq.md", "/docs/faq", None),
        ]
    }

    fn titles(items: &[NavItem]) -> Vec<String> {
        items.iter().map(|i| i.title.clone()).collect()
    }

    fn sidebars(yaml: &str) -> BTreeMap<String, Sidebars> {
        let mut map = BTreeMap::new();
        map.insert("default".to_string(), Sidebars::from_yaml(yaml).unwrap());
        map
    }

    #[test]
    fn autogenerates_by_position_then_name() {
        let mut map = BTreeMap::new();
        map.insert("default".to_string(), Sidebars::autogenerated());

        let set = SidebarSet::resolve(&map, &docs(), "/").unwrap();
        let items = set.for_route("/docs/intro");

        assert_eq!(titles(&items), vec!["intro", "faq", "Guides"]);
        assert_eq!(titles(&items[2].children), vec!["load", "save"]);
        assert_eq!(items[2].path, "/docs/guides");
        assert!(items[0].active);
        assert!(items[2].collapsed);
    }

    #[test]
    fn resolves_explicit_items() {
        let map = sidebars(
            r#"
docs:
  - intro
  - type: category
    label: Guides
    collapsed: false
    items:
      - type: doc
        id: guides/save
        label: Saving
  - type: link
    label: GitHub
    href: https://github.com/xceedsoftware
  - type: link
    label: About
    href: /about
"#,
        );

        let set = SidebarSet::resolve(&map, &docs(), "/xceed-libs-doc/").unwrap();
        let items = set.for_route("/docs/guides/save");

        assert_eq!(titles(&items), vec!["intro", "Guides", "GitHub", "About"]);
        assert_eq!(items[1].children[0].title, "Saving");
        assert!(items[1].children[0].active);
        assert!(items[2].external);
        assert_eq!(items[3].path, "/xceed-libs-doc/about");
        assert_eq!(set.links().len(), 1);
        assert_eq!(set.links()[0].href, "/about");
        assert_eq!(
            set.first_doc_route("default", "docs").as_deref(),
            Some("/docs/intro")
        );
    }

    #[test]
    fn unknown_doc_id_fails() {
        let map = sidebars("docs:\n  - missing\n");

        let err = SidebarSet::resolve(&map, &docs(), "/").unwrap_err();

        match err {
            BuildError::UnknownDoc { sidebar, id, .. } => {
                assert_eq!(sidebar, "docs");
                assert_eq!(id, "missing");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn paginates_in_sidebar_order() {
        let map = sidebars("docs:\n  - intro\n  - guides/load\n  - faq\n");
        let set = SidebarSet::resolve(&map, &docs(), "/").unwrap();

        let (previous, next) = set.pagination("/docs/guides/load");
        assert_eq!(previous.unwrap().href, "/docs/intro");
        assert_eq!(next.unwrap().href, "/docs/faq");

        let (previous, _) = set.pagination("/docs/intro");
        assert!(previous.is_none());

        assert!(set.for_route("/docs/guides/save").is_empty());
    }

    #[test]
    fn marks_nested_active_item() {
        let mut items = vec![NavItem {
            title: "Guides".to_string(),
            collapsed: true,
            children: vec![NavItem {
                title: "Save".to_string(),
                route: "/docs/guides/save".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        }];

        assert!(mark_active(&mut items, "/docs/guides/save"));
        assert!(!items[0].collapsed);
        assert!(items[0].children[0].active);
    }
}
