//! TCX document navigation, extraction, and assembly.
//!
//! A TCX file is rooted at `model-data`, with a version string under
//! `identification/xml-version` and the mutable sections under `model`:
//! `named-domains/named-domain`, `root-parts`, `collections/collection`,
//! `applications/application`, `includes/module`, and the derived
//! `component-classes`.

use crate::error::CodecError;
use crate::tree::{self, XmlNode};
use crate::value::{node_from_value, node_to_value};
use serde_json::{Map, Value};
use tcx_backup_core::{Backup, DomainElement, DomainSet, NamedDomain};

/// A parsed TCX document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TcxDocument {
    root: XmlNode,
}

impl TcxDocument {
    /// Parse document text.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Xml`] on malformed XML and
    /// [`CodecError::MissingSection`] when the root is not `model-data`.
    pub fn parse(content: &str) -> Result<Self, CodecError> {
        let root = tree::parse(content)?;
        if root.name != "model-data" {
            return Err(CodecError::missing_section("model-data"));
        }
        Ok(Self { root })
    }

    /// Serialize back into document text.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Xml`] if the writer fails.
    pub fn serialize(&self) -> Result<String, CodecError> {
        tree::serialize(&self.root)
    }

    /// The document's root element.
    #[must_use]
    pub fn root(&self) -> &XmlNode {
        &self.root
    }

    fn model(&self) -> Result<&XmlNode, CodecError> {
        self.root
            .child("model")
            .ok_or_else(|| CodecError::missing_section("model"))
    }

    /// Version string from `identification/xml-version`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::MissingField`] when the version is absent.
    pub fn version(&self) -> Result<&str, CodecError> {
        self.root
            .child("identification")
            .and_then(|n| n.child("xml-version"))
            .and_then(XmlNode::text)
            .ok_or_else(|| CodecError::missing_field("identification", "xml-version"))
    }

    /// Extract the named-domain collection.
    ///
    /// A one-entry collection yields a bare [`DomainSet::One`], matching the
    /// document format's single-entry shape; consumers normalize through
    /// [`DomainSet::into_vec`].
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::MissingSection`] when `named-domains` is absent
    /// and [`CodecError::MissingField`] when a domain or element has no name.
    pub fn domains(&self) -> Result<DomainSet, CodecError> {
        let container = self
            .model()?
            .child("named-domains")
            .ok_or_else(|| CodecError::missing_section("named-domains"))?;

        let mut domains = Vec::new();
        for node in container.children_named("named-domain") {
            domains.push(domain_from_node(node)?);
        }

        if domains.len() == 1 {
            Ok(DomainSet::One(domains.remove(0)))
        } else {
            Ok(DomainSet::Many(domains))
        }
    }

    /// The derived `component-classes` subtree, when present.
    ///
    /// Always recomputed from the live document at restore time; the backup
    /// never contributes this section.
    #[must_use]
    pub fn component_classes(&self) -> Option<XmlNode> {
        self.root
            .child("model")
            .and_then(|m| m.child("component-classes"))
            .cloned()
    }

    /// Project a whole model section into its JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::MissingSection`] when the section is absent.
    pub fn section_value(&self, name: &str) -> Result<Value, CodecError> {
        let section = self
            .model()?
            .child(name)
            .ok_or_else(|| CodecError::missing_section(name))?;
        Ok(node_to_value(section))
    }

    /// Project the `item` entries of a model section.
    ///
    /// One entry yields a bare object (the document format's single-entry
    /// shape); zero or many yield an array.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::MissingSection`] when the section is absent.
    pub fn section_items(&self, section: &str, item: &str) -> Result<Value, CodecError> {
        let container = self
            .model()?
            .child(section)
            .ok_or_else(|| CodecError::missing_section(section))?;

        let mut items: Vec<Value> = container.children_named(item).map(node_to_value).collect();
        if items.len() == 1 {
            Ok(items.remove(0))
        } else {
            Ok(Value::Array(items))
        }
    }

    /// Assemble a replacement document from a restored projection plus the
    /// live document's component classes.
    #[must_use]
    pub fn assemble(backup: &Backup, component_classes: Option<&XmlNode>) -> Self {
        let mut identification = XmlNode::new("identification");
        identification
            .children
            .push(XmlNode::text_element("xml-version", &backup.version));

        let mut named_domains = XmlNode::new("named-domains");
        for domain in backup.named_domains.clone().into_vec() {
            named_domains.children.push(domain_to_node(&domain));
        }

        let mut model = XmlNode::new("model");
        model.children.push(named_domains);
        model
            .children
            .push(node_from_value("root-parts", &backup.root_parts));
        model
            .children
            .push(section_from_items("collections", "collection", &backup.collections));
        model
            .children
            .push(section_from_items("applications", "application", &backup.applications));
        model
            .children
            .push(section_from_items("includes", "module", &backup.includes));
        if let Some(classes) = component_classes {
            model.children.push(classes.clone());
        }

        let mut root = XmlNode::new("model-data");
        root.children.push(identification);
        root.children.push(model);

        tracing::debug!(
            domains = backup.named_domains.len(),
            classes = component_classes.is_some(),
            "Assembled document"
        );

        Self { root }
    }
}

fn domain_from_node(node: &XmlNode) -> Result<NamedDomain, CodecError> {
    let name = node
        .child("name")
        .and_then(XmlNode::text)
        .ok_or_else(|| CodecError::missing_field("named-domain", "name"))?;

    let mut elements = Vec::new();
    if let Some(container) = node.child("elements") {
        for element_node in container.children_named("element") {
            elements.push(element_from_node(element_node)?);
        }
    }

    Ok(NamedDomain::new(name, elements))
}

fn element_from_node(node: &XmlNode) -> Result<DomainElement, CodecError> {
    let Value::Object(mut fields) = node_to_value(node) else {
        return Err(CodecError::missing_field("element", "name"));
    };

    match fields.shift_remove("name") {
        Some(Value::String(name)) => Ok(DomainElement::with_fields(name, fields)),
        _ => Err(CodecError::missing_field("element", "name")),
    }
}

fn domain_to_node(domain: &NamedDomain) -> XmlNode {
    let mut node = XmlNode::new("named-domain");
    node.children
        .push(XmlNode::text_element("name", &domain.name));

    let mut elements = XmlNode::new("elements");
    for element in &domain.elements {
        elements.children.push(element_to_node(element));
    }
    node.children.push(elements);

    node
}

fn element_to_node(element: &DomainElement) -> XmlNode {
    let mut value = Map::new();
    value.insert("name".to_string(), Value::String(element.name.clone()));
    for (key, field) in &element.fields {
        value.insert(key.clone(), field.clone());
    }
    node_from_value("element", &Value::Object(value))
}

fn section_from_items(section: &str, item: &str, items: &Value) -> XmlNode {
    let mut node = XmlNode::new(section);
    match items {
        Value::Array(entries) => {
            for entry in entries {
                node.children.push(node_from_value(item, entry));
            }
        }
        Value::Null => {}
        single => node.children.push(node_from_value(item, single)),
    }
    node
}
