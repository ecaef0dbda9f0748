//! Namespace-qualified lookups over a parsed CAMT document.
//!
//! CAMT files declare their schema as a default namespace on the root
//! element (`urn:iso:std:iso:20022:tech:xsd:camt.053.001.02` and later
//! revisions). The namespace is resolved once per document and every lookup
//! matches on both the local name and that namespace, so elements from a
//! foreign namespace with a colliding local name are never picked up.
//!
//! Lookups never fail. An element that is not there is `None` (or an empty
//! iterator) and the caller applies the field default.

use roxmltree::{Document, Node};

/// Lookups bound to one document and its resolved default namespace.
#[derive(Clone, Copy)]
pub struct NsQuery<'a, 'input> {
    doc: &'a Document<'input>,
    ns: Option<&'a str>,
}

impl<'a, 'input> NsQuery<'a, 'input> {
    /// Resolve the default namespace of `doc`.
    ///
    /// Documents without a default namespace (or with `xmlns=""`) are
    /// queried for un-namespaced elements.
    pub fn new(doc: &'a Document<'input>) -> Self {
        let ns = doc
            .root_element()
            .default_namespace()
            .filter(|uri| !uri.is_empty());
        Self { doc, ns }
    }

    /// The resolved default namespace URI, if any.
    pub fn namespace(&self) -> Option<&'a str> {
        self.ns
    }

    /// Check if `node` is an element named `local` in the resolved namespace.
    ///
    /// # Examples
    /// ```
    /// use roxmltree::Document;
    /// use camt_extractor::xml::NsQuery;
    ///
    /// let xml = r#"<Document xmlns="urn:camt"><Stmt/></Document>"#;
    /// let doc = Document::parse(xml).unwrap();
    /// let query = NsQuery::new(&doc);
    /// let stmt = doc.root_element().first_element_child().unwrap();
    ///
    /// assert!(query.is(stmt, "Stmt"));
    /// assert!(!query.is(stmt, "Ntry"));
    /// ```
    pub fn is(&self, node: Node<'_, '_>, local: &str) -> bool {
        node.is_element()
            && node.tag_name().name() == local
            && node.tag_name().namespace() == self.ns
    }

    /// First element named `local` anywhere in the document.
    ///
    /// This is the document-wide lookup used for group-header fields. It is
    /// never scoped to a statement, even when called while walking one.
    pub fn first_in_document(&self, local: &str) -> Option<Node<'a, 'input>> {
        self.doc.descendants().find(|n| self.is(*n, local))
    }

    /// All elements named `local` below `scope`, in document order.
    ///
    /// `scope` itself is not included.
    pub fn descendants(
        self,
        scope: Node<'a, 'input>,
        local: &'a str,
    ) -> impl Iterator<Item = Node<'a, 'input>> {
        scope
            .descendants()
            .skip(1)
            .filter(move |n| self.is(*n, local))
    }

    /// First element named `local` below `scope`.
    ///
    /// The subtree-scoped counterpart of [`NsQuery::first_in_document`].
    pub fn first_in(&self, scope: Node<'a, 'input>, local: &str) -> Option<Node<'a, 'input>> {
        scope.descendants().skip(1).find(|n| self.is(*n, local))
    }

    /// First direct child element of `scope` named `local`.
    pub fn child(&self, scope: Node<'a, 'input>, local: &str) -> Option<Node<'a, 'input>> {
        scope.children().find(|n| self.is(*n, local))
    }

    /// First `local` element that is a direct child of any `parent` element
    /// below `scope`.
    ///
    /// `Acct/Nm` must not match the `Nm` of the account servicer, which sits
    /// deeper under `Acct/Svcr/FinInstnId`.
    pub fn first_child_of(
        &self,
        scope: Node<'a, 'input>,
        parent: &'a str,
        local: &str,
    ) -> Option<Node<'a, 'input>> {
        self.descendants(scope, parent)
            .find_map(|p| self.child(p, local))
    }

    /// First `local` element anywhere below any `ancestor` element below
    /// `scope`.
    pub fn first_under(
        &self,
        scope: Node<'a, 'input>,
        ancestor: &'a str,
        local: &str,
    ) -> Option<Node<'a, 'input>> {
        self.descendants(scope, ancestor)
            .find_map(|a| self.first_in(a, local))
    }
}

/// String value of an element: its descendant text, as written.
///
/// Whitespace-only text nodes (indentation between elements) are skipped;
/// any other text keeps its surrounding whitespace. Container elements such
/// as `Acct/Id` or `OrgId` carry their value in a nested element (`IBAN`,
/// `Othr/Id`); their string value is that nested text.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use camt_extractor::xml::text_of;
///
/// let xml = "<Id>\n  <IBAN>NL91ABNA0417164300</IBAN>\n</Id>";
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(text_of(doc.root_element()), "NL91ABNA0417164300");
///
/// let doc = Document::parse("<Amt> 123.45 </Amt>").unwrap();
/// assert_eq!(text_of(doc.root_element()), " 123.45 ");
/// ```
pub fn text_of(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .filter(|text| !text.trim().is_empty())
        .collect()
}

/// Optional string value, for feeding the default table.
pub fn text_opt(node: Option<Node<'_, '_>>) -> Option<String> {
    node.map(text_of)
}
