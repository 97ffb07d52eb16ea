//! Node builder/updater
//!
//! A build runs in two passes:
//!
//! ```text
//! Vec<BuildArg> → plan (parse, validate, resolve tags) → realize (NodeApi calls)
//! ```
//!
//! Every error is raised by the plan pass, so a failed call never leaves the
//! document half mutated. Realizing applies, per element: id, classes,
//! attributes, text, children.

use ahash::AHashSet;
use dom::NodeApi;

use crate::args::{BuildArg, Child};
use crate::attrs::{Attrs, CLASS_KEY};
use crate::config::BuilderConfig;
use crate::error::{DomatorError, Result};
use crate::selector::{parse_selector, SelectorDescriptor};

/// Validated description of one element's mutations
#[derive(Debug)]
struct ElementPlan<N> {
    descriptor: SelectorDescriptor,
    attrs: Attrs,
    /// `None` when no child argument was given
    children: Option<Vec<NodePlan<N>>>,
}

impl<N> ElementPlan<N> {
    fn new(descriptor: SelectorDescriptor) -> Self {
        Self {
            descriptor,
            attrs: Attrs::new(),
            children: None,
        }
    }

    fn children_mut(&mut self) -> &mut Vec<NodePlan<N>> {
        self.children.get_or_insert_with(Vec::new)
    }
}

#[derive(Debug)]
enum NodePlan<N> {
    Text(String),
    Element { tag: String, plan: ElementPlan<N> },
    Existing(N),
}

#[derive(Debug)]
enum RootPlan<N> {
    Single(NodePlan<N>),
    Update { target: N, plan: ElementPlan<N> },
    Fragment(Vec<NodePlan<N>>),
}

/// Top-level grouping in create mode: a selector and what follows it, or
/// children that appeared before any selector
#[derive(Debug)]
enum Group<N> {
    Element(ElementPlan<N>),
    Loose(Vec<NodePlan<N>>),
}

/// Build or update according to the argument list
pub(crate) fn build<A: NodeApi>(
    api: &mut A,
    config: &BuilderConfig,
    args: Vec<BuildArg<A::Node>>,
) -> Result<A::Node> {
    let planner = Planner {
        api: &*api,
        config,
        target: None,
    };
    let plan = planner.plan(args)?;
    realize_root(api, plan)
}

struct Planner<'a, A: NodeApi> {
    api: &'a A,
    config: &'a BuilderConfig,
    /// Element being updated; existing nodes must not contain it
    target: Option<A::Node>,
}

impl<'a, A: NodeApi> Planner<'a, A> {
    fn plan(&self, args: Vec<BuildArg<A::Node>>) -> Result<RootPlan<A::Node>> {
        let mut args = args.into_iter().enumerate();

        match args.next() {
            None => Err(DomatorError::InvalidArgument {
                index: 0,
                reason: "at least one argument is required".to_string(),
            }),
            Some((_, BuildArg::Node(target))) => {
                let planner = Planner {
                    api: self.api,
                    config: self.config,
                    target: Some(target),
                };
                planner.plan_update(target, args)
            }
            Some(first) => self.plan_create(std::iter::once(first).chain(args)),
        }
    }

    fn plan_update(
        &self,
        target: A::Node,
        args: impl Iterator<Item = (usize, BuildArg<A::Node>)>,
    ) -> Result<RootPlan<A::Node>> {
        if !self.api.contains(target) {
            return Err(DomatorError::Target(format!(
                "node {target:?} does not belong to this document"
            )));
        }
        if !self.api.is_element(target) {
            return Err(DomatorError::Target(format!(
                "node {target:?} is not an element"
            )));
        }

        let mut plan = ElementPlan::new(SelectorDescriptor::default());
        for (index, arg) in args {
            match arg {
                BuildArg::Selector(selector) => {
                    let descriptor = parse_selector(&selector)?;
                    if let Some(tag) = &descriptor.tag {
                        tracing::debug!(
                            "[Domator] Ignoring tag `{}` while updating {:?}",
                            tag,
                            target
                        );
                    }
                    plan.descriptor.merge(descriptor);
                }
                BuildArg::Attrs(attrs) => plan.attrs.merge(attrs),
                BuildArg::Children(children) => {
                    self.plan_children(index, children, plan.children_mut())?;
                }
                BuildArg::Node(node) => {
                    let child = self.plan_existing(index, node)?;
                    plan.children_mut().push(child);
                }
            }
        }

        Ok(RootPlan::Update { target, plan })
    }

    fn plan_create(
        &self,
        args: impl Iterator<Item = (usize, BuildArg<A::Node>)>,
    ) -> Result<RootPlan<A::Node>> {
        let mut groups: Vec<Group<A::Node>> = Vec::new();

        for (index, arg) in args {
            match arg {
                BuildArg::Selector(selector) => {
                    groups.push(Group::Element(ElementPlan::new(parse_selector(&selector)?)));
                }
                BuildArg::Attrs(attrs) => match groups.last_mut() {
                    Some(Group::Element(plan)) => plan.attrs.merge(attrs),
                    _ => {
                        return Err(DomatorError::Target(format!(
                            "attribute mapping at position {index} has no element to apply to"
                        )))
                    }
                },
                BuildArg::Children(children) => {
                    self.plan_children(index, children, open_children(&mut groups))?;
                }
                BuildArg::Node(node) => {
                    let child = self.plan_existing(index, node)?;
                    open_children(&mut groups).push(child);
                }
            }
        }

        let single = groups.len() == 1 && matches!(groups[0], Group::Element(_));
        let mut nodes = Vec::with_capacity(groups.len());
        for group in groups {
            match group {
                Group::Element(plan) => nodes.push(self.resolve(plan)?),
                Group::Loose(children) => nodes.extend(children),
            }
        }

        if single {
            if let Some(node) = nodes.pop() {
                return Ok(RootPlan::Single(node));
            }
        }
        Ok(RootPlan::Fragment(nodes))
    }

    fn plan_children(
        &self,
        index: usize,
        children: Vec<Child<A::Node>>,
        out: &mut Vec<NodePlan<A::Node>>,
    ) -> Result<()> {
        for child in children {
            match child {
                Child::Text(text) => out.push(NodePlan::Text(text)),
                Child::Selector(selector) => {
                    out.push(self.resolve(ElementPlan::new(parse_selector(&selector)?))?);
                }
                Child::Node(node) => out.push(self.plan_existing(index, node)?),
                Child::List(nested) => self.plan_children(index, nested, out)?,
            }
        }
        Ok(())
    }

    fn plan_existing(&self, index: usize, node: A::Node) -> Result<NodePlan<A::Node>> {
        if !self.api.contains(node) {
            return Err(DomatorError::InvalidArgument {
                index,
                reason: format!("node {node:?} does not belong to this document"),
            });
        }
        // Also covers a fragment holding the target
        if let Some(target) = self.target {
            if self.api.is_inclusive_ancestor(node, target) {
                return Err(DomatorError::InvalidArgument {
                    index,
                    reason: format!("node {node:?} contains the update target {target:?}"),
                });
            }
        }
        Ok(NodePlan::Existing(node))
    }

    /// Decide what node a selector group becomes
    fn resolve(&self, mut plan: ElementPlan<A::Node>) -> Result<NodePlan<A::Node>> {
        if plan.descriptor.is_text_only() && plan.attrs.is_empty() && plan.children.is_none() {
            return Ok(NodePlan::Text(plan.descriptor.text.unwrap_or_default()));
        }

        let tag = plan
            .descriptor
            .tag
            .take()
            .or_else(|| self.config.default_tag.clone())
            .ok_or_else(|| {
                DomatorError::Target(
                    "selector has no tag and there is no element to update".to_string(),
                )
            })?;

        Ok(NodePlan::Element { tag, plan })
    }
}

fn open_children<N>(groups: &mut Vec<Group<N>>) -> &mut Vec<NodePlan<N>> {
    if groups.is_empty() {
        groups.push(Group::Loose(Vec::new()));
    }
    let last = groups.len() - 1;
    match &mut groups[last] {
        Group::Element(plan) => plan.children_mut(),
        Group::Loose(children) => children,
    }
}

fn realize_root<A: NodeApi>(api: &mut A, plan: RootPlan<A::Node>) -> Result<A::Node> {
    match plan {
        RootPlan::Single(node) => realize_node(api, node),
        RootPlan::Update { target, plan } => {
            tracing::debug!("[Domator] Updating existing node {:?}", target);
            apply(api, target, plan, true)?;
            Ok(target)
        }
        RootPlan::Fragment(nodes) => {
            tracing::debug!("[Domator] Building fragment of {} nodes", nodes.len());
            let fragment = api.create_fragment();
            for node in nodes {
                let child = realize_node(api, node)?;
                api.append_child(fragment, child)?;
            }
            Ok(fragment)
        }
    }
}

fn realize_node<A: NodeApi>(api: &mut A, node: NodePlan<A::Node>) -> Result<A::Node> {
    match node {
        NodePlan::Text(text) => Ok(api.create_text_node(&text)),
        NodePlan::Element { tag, plan } => {
            tracing::trace!("[Domator] Creating <{}>", tag);
            let element = api.create_element(&tag);
            apply(api, element, plan, false)?;
            Ok(element)
        }
        NodePlan::Existing(node) => Ok(node),
    }
}

/// Apply id, classes, attributes, text and children to `element`.
/// With `replace`, existing children are dropped before new content lands.
fn apply<A: NodeApi>(
    api: &mut A,
    element: A::Node,
    plan: ElementPlan<A::Node>,
    replace: bool,
) -> Result<()> {
    let ElementPlan {
        descriptor,
        attrs,
        children,
    } = plan;

    if let Some(id) = &descriptor.id {
        api.set_id(element, id)?;
    }

    // A `[class=...]` token joins the union after the `.class` tokens
    let selector_class_attr = descriptor
        .attrs
        .get(CLASS_KEY)
        .into_iter()
        .flat_map(str::split_ascii_whitespace);

    let mut seen = AHashSet::new();
    for class in descriptor
        .classes
        .iter()
        .map(String::as_str)
        .chain(selector_class_attr)
        .chain(attrs.classes())
    {
        if seen.insert(class) {
            api.class_list_add(element, class)?;
        }
    }

    let selector_attrs = descriptor.attrs.iter().filter(|(name, _)| *name != CLASS_KEY);
    for (name, value) in selector_attrs.chain(attrs.plain().iter()) {
        api.set_attribute(element, name, value)?;
    }

    // Selector text is shorthand for the `text` key and takes precedence
    let text = descriptor.text.as_deref().or(attrs.text());
    if text.is_none() && children.is_none() {
        return Ok(());
    }

    if replace {
        api.remove_children(element)?;
    }
    if let Some(text) = text {
        let text_node = api.create_text_node(text);
        api.append_child(element, text_node)?;
    }
    for child in children.into_iter().flatten() {
        let node = realize_node(api, child)?;
        api.append_child(element, node)?;
    }

    Ok(())
}
