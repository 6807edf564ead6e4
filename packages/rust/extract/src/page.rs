//! In-memory element tree used by the title/author resolvers and the link
//! harvester.
//!
//! A [`Page`] is a flattened snapshot of a parsed HTML document: elements are
//! stored in document (pre-order) order, each with its tag, attributes, and
//! the index range of its subtree. That makes "document order" a plain index
//! comparison and ancestor checks a range test. Text nodes are stored once,
//! in document order, and every element refers to the contiguous run of text
//! segments inside its subtree.

use std::borrow::Cow;
use std::collections::HashMap;

use scraper::{ElementRef, Html};
use url::Url;

/// Index of an element within a [`Page`]. Lower ids come first in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct PageElement {
    tag: String,
    attrs: Vec<(String, String)>,
    parent: Option<usize>,
    /// Index of the last element in this element's subtree.
    last_descendant: usize,
    /// Text segments `text_start..text_end` lie inside this element.
    text_start: usize,
    text_end: usize,
}

/// A parsed page anchored at a base URL.
#[derive(Debug, Clone)]
pub struct Page {
    base_url: Url,
    elements: Vec<PageElement>,
    texts: Vec<String>,
}

/// Borrowed view of one element.
#[derive(Debug, Clone, Copy)]
pub struct ElementView<'a> {
    page: &'a Page,
    id: NodeId,
}

impl Page {
    /// Parse an HTML document. Parsing is lenient and never fails.
    pub fn parse(html: &str, base_url: &Url) -> Self {
        let doc = Html::parse_document(html);
        let mut elements: Vec<PageElement> = Vec::new();
        let mut texts: Vec<String> = Vec::new();
        let mut index: HashMap<_, usize> = HashMap::new();

        for node in doc.root_element().descendants() {
            let owner = node
                .ancestors()
                .find(|a| a.value().is_element())
                .and_then(|a| index.get(&a.id()).copied());

            if let Some(text) = node.value().as_text() {
                texts.push(text.to_string());
                if let Some(o) = owner {
                    elements[o].text_end = texts.len();
                }
                continue;
            }

            let Some(el) = ElementRef::wrap(node) else {
                continue;
            };
            let position = elements.len();
            index.insert(node.id(), position);
            elements.push(PageElement {
                tag: el.value().name().to_ascii_lowercase(),
                attrs: el
                    .value()
                    .attrs()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                parent: owner,
                last_descendant: position,
                text_start: texts.len(),
                text_end: texts.len(),
            });
        }

        Self::from_elements(base_url.clone(), elements, texts)
    }

    /// Start building a page by hand, without HTML parsing.
    pub fn builder(base_url: &Url) -> PageBuilder {
        PageBuilder {
            base_url: base_url.clone(),
            elements: Vec::new(),
            texts: Vec::new(),
            open: Vec::new(),
        }
    }

    fn from_elements(base_url: Url, mut elements: Vec<PageElement>, texts: Vec<String>) -> Self {
        // Children always have higher indices than their parents, so a single
        // reverse pass settles every subtree range.
        for i in (0..elements.len()).rev() {
            if let Some(p) = elements[i].parent {
                let (last, text_end) = (elements[i].last_descendant, elements[i].text_end);
                let parent = &mut elements[p];
                parent.last_descendant = parent.last_descendant.max(last);
                parent.text_end = parent.text_end.max(text_end);
            }
        }
        Self {
            base_url,
            elements,
            texts,
        }
    }

    /// Resolve a possibly relative reference against the base URL.
    pub fn resolve(&self, href: &str) -> Option<Url> {
        self.base_url.join(href).ok()
    }

    /// All elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = ElementView<'_>> + '_ {
        (0..self.elements.len()).map(move |i| ElementView {
            page: self,
            id: NodeId(i),
        })
    }

    /// First element, in document order, matching `predicate`.
    pub fn find_first<F>(&self, predicate: F) -> Option<ElementView<'_>>
    where
        F: Fn(&ElementView<'_>) -> bool,
    {
        self.elements().find(|el| predicate(el))
    }

    /// Every element matching `predicate`, in document order.
    pub fn find_all<F>(&self, predicate: F) -> Vec<ElementView<'_>>
    where
        F: Fn(&ElementView<'_>) -> bool,
    {
        self.elements().filter(|el| predicate(el)).collect()
    }

    /// First element with the given tag name.
    pub fn first_tag(&self, tag: &str) -> Option<ElementView<'_>> {
        self.find_first(|el| el.is(tag))
    }

    /// Whether `node` is a strict descendant of `ancestor`.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.elements
            .get(ancestor.0)
            .is_some_and(|a| node.0 > ancestor.0 && node.0 <= a.last_descendant)
    }

    /// Whether any strict ancestor of `node` matches `predicate`.
    pub fn has_ancestor<F>(&self, node: NodeId, predicate: F) -> bool
    where
        F: Fn(&ElementView<'_>) -> bool,
    {
        let mut current = self.elements.get(node.0).and_then(|e| e.parent);
        while let Some(i) = current {
            let view = ElementView {
                page: self,
                id: NodeId(i),
            };
            if predicate(&view) {
                return true;
            }
            current = self.elements[i].parent;
        }
        false
    }

    fn element(&self, id: NodeId) -> &PageElement {
        &self.elements[id.0]
    }
}

impl<'a> ElementView<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Lowercase tag name.
    pub fn tag(&self) -> &'a str {
        &self.page.element(self.id).tag
    }

    /// Whether this element has the given (lowercase) tag name.
    pub fn is(&self, tag: &str) -> bool {
        self.tag() == tag
    }

    /// Attribute value, if present.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.page
            .element(self.id)
            .attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Concatenated text of all descendant text nodes. Borrowed when the
    /// element holds a single text segment.
    pub fn text(&self) -> Cow<'a, str> {
        let page = self.page;
        let el = page.element(self.id);
        match &page.texts[el.text_start..el.text_end] {
            [] => Cow::Borrowed(""),
            [only] => Cow::Borrowed(only.as_str()),
            segments => Cow::Owned(segments.concat()),
        }
    }

    /// Text with surrounding whitespace removed.
    pub fn trimmed_text(&self) -> Cow<'a, str> {
        match self.text() {
            Cow::Borrowed(text) => Cow::Borrowed(text.trim()),
            Cow::Owned(text) => Cow::Owned(text.trim().to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// PageBuilder
// ---------------------------------------------------------------------------

/// Builds a [`Page`] element by element. Text belongs to every element that
/// is open when it is added.
#[derive(Debug)]
pub struct PageBuilder {
    base_url: Url,
    elements: Vec<PageElement>,
    texts: Vec<String>,
    open: Vec<usize>,
}

impl PageBuilder {
    /// Open an element as a child of the innermost open element.
    pub fn open(mut self, tag: &str, attrs: &[(&str, &str)]) -> Self {
        let index = self.elements.len();
        self.elements.push(PageElement {
            tag: tag.to_ascii_lowercase(),
            attrs: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            parent: self.open.last().copied(),
            last_descendant: index,
            text_start: self.texts.len(),
            text_end: self.texts.len(),
        });
        self.open.push(index);
        self
    }

    /// Append a text segment inside the innermost open element.
    pub fn text(mut self, text: &str) -> Self {
        self.texts.push(text.to_string());
        if let Some(&i) = self.open.last() {
            self.elements[i].text_end = self.texts.len();
        }
        self
    }

    /// Close the innermost open element.
    pub fn close(mut self) -> Self {
        self.open.pop();
        self
    }

    /// Shorthand for `open(tag, attrs).text(text).close()`.
    pub fn leaf(self, tag: &str, attrs: &[(&str, &str)], text: &str) -> Self {
        self.open(tag, attrs).text(text).close()
    }

    /// Finish the page. Elements still open are closed implicitly.
    pub fn build(self) -> Page {
        Page::from_elements(self.base_url, self.elements, self.texts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://blog.example.com/posts/one").unwrap()
    }

    #[test]
    fn parse_keeps_document_order() {
        let page = Page::parse(
            "<html><body><header><h1>Site</h1></header><main><h1>Post</h1><p>Text</p></main></body></html>",
            &base(),
        );
        let tags: Vec<&str> = page.elements().map(|el| el.tag()).collect();
        assert_eq!(
            tags,
            vec!["html", "head", "body", "header", "h1", "main", "h1", "p"]
        );
    }

    #[test]
    fn contains_checks_subtree_range() {
        let page = Page::parse(
            "<body><header><div><h1>Site</h1></div></header><h1>Post</h1></body>",
            &base(),
        );
        let header = page.first_tag("header").unwrap();
        let h1s = page.find_all(|el| el.is("h1"));
        assert_eq!(h1s.len(), 2);
        assert!(page.contains(header.id(), h1s[0].id()));
        assert!(!page.contains(header.id(), h1s[1].id()));
        assert!(!page.contains(header.id(), header.id()));
    }

    #[test]
    fn text_and_attributes() {
        let page = Page::parse(
            r#"<body><div class="byline" id="Main"> By <b>Ann</b> </div></body>"#,
            &base(),
        );
        let div = page.first_tag("div").unwrap();
        assert_eq!(div.trimmed_text(), "By Ann");
        assert_eq!(div.attr("class"), Some("byline"));
        assert_eq!(div.attr("ID"), Some("Main"));
        assert_eq!(div.attr("title"), None);
    }

    #[test]
    fn text_is_stored_once_per_segment() {
        let page = Page::parse(
            "<body><div><section><p>one <em>two</em></p> three</section></div><p>four</p></body>",
            &base(),
        );
        assert_eq!(page.texts, vec!["one ", "two", " three", "four"]);

        let div = page.first_tag("div").unwrap();
        let em = page.first_tag("em").unwrap();
        let last_p = page.find_all(|el| el.is("p"))[1];
        assert_eq!(div.text(), "one two three");
        assert!(matches!(em.text(), Cow::Borrowed("two")));
        assert_eq!(last_p.text(), "four");
        assert_eq!(page.first_tag("body").unwrap().text(), "one two threefour");
    }

    #[test]
    fn element_without_text_is_empty() {
        let page = Page::parse("<body><p>a</p><br><p>b</p></body>", &base());
        assert_eq!(page.first_tag("br").unwrap().text(), "");
    }

    #[test]
    fn has_ancestor_walks_up() {
        let page = Page::parse("<body><article><section><h1>T</h1></section></article></body>", &base());
        let h1 = page.first_tag("h1").unwrap();
        assert!(page.has_ancestor(h1.id(), |a| a.is("article")));
        assert!(!page.has_ancestor(h1.id(), |a| a.is("main")));
    }

    #[test]
    fn resolve_relative_href() {
        let page = Page::parse("<body></body>", &base());
        assert_eq!(
            page.resolve("two").map(|u| u.to_string()),
            Some("https://blog.example.com/posts/two".to_string())
        );
    }

    #[test]
    fn builder_attributes_text_to_open_elements() {
        let page = Page::builder(&base())
            .open("body", &[])
            .open("main", &[])
            .leaf("h1", &[], "Title")
            .close()
            .leaf("p", &[], "After")
            .build();

        let body = page.first_tag("body").unwrap();
        let main = page.first_tag("main").unwrap();
        let p = page.first_tag("p").unwrap();
        assert_eq!(body.text(), "TitleAfter");
        assert_eq!(main.text(), "Title");
        assert!(page.contains(body.id(), p.id()));
        assert!(!page.contains(main.id(), p.id()));
    }
}
