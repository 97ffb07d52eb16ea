//! Behavioral tests: every build is compared against the same tree made with
//! plain document calls.

use dom::{DomArena, NodeApi, NodeId};
use domator::{
    args, build, parse_selector, to_string, Attrs, BuildArg, Child, Domator, DomatorError,
};

/// Helper to create an element with the given attributes in order
fn element(doc: &mut DomArena, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
    let id = doc.create_element(tag);
    for (name, value) in attrs {
        doc.set_attribute(id, name, value).unwrap();
    }
    id
}

fn with_text(doc: &mut DomArena, tag: &str, text: &str) -> NodeId {
    let id = doc.create_element(tag);
    let text = doc.create_text_node(text);
    doc.append_child(id, text).unwrap();
    id
}

#[test]
fn test_creates_div() {
    let mut doc = DomArena::new();
    let built = build(&mut doc, args!["div"]).unwrap();

    let expected = doc.create_element("div");
    assert!(doc.is_equal_node(expected, built));
}

#[test]
fn test_creates_div_with_class_and_id() {
    let mut doc = DomArena::new();
    let built = build(&mut doc, args!["#the-id.the-class"]).unwrap();

    let expected = doc.create_element("div");
    doc.set_id(expected, "the-id").unwrap();
    doc.class_list_add(expected, "the-class").unwrap();
    assert!(doc.is_equal_node(expected, built));
}

#[test]
fn test_creates_div_with_custom_attrs() {
    let mut doc = DomArena::new();
    let built = build(
        &mut doc,
        args![r#"div[data-custom="some-value"][data-custom2="other-value"]"#],
    )
    .unwrap();

    let expected = element(
        &mut doc,
        "div",
        &[("data-custom", "some-value"), ("data-custom2", "other-value")],
    );
    assert!(doc.is_equal_node(expected, built));
}

#[test]
fn test_creates_div_with_text() {
    let mut doc = DomArena::new();
    let built = build(&mut doc, args!["div Hello World!"]).unwrap();

    let expected = doc.create_element("div");
    doc.set_text_content(expected, "Hello World!").unwrap();
    assert!(doc.is_equal_node(expected, built));
}

#[test]
fn test_creates_div_with_attrs_from_mapping() {
    let mut doc = DomArena::new();
    let attrs = Attrs::new()
        .with("src", "http://google.com")
        .with("title", "Title content");
    let built = build(&mut doc, args!["div", attrs]).unwrap();

    let expected = element(
        &mut doc,
        "div",
        &[("src", "http://google.com"), ("title", "Title content")],
    );
    assert!(doc.is_equal_node(expected, built));
}

#[test]
fn test_creates_div_with_two_span_children() {
    let mut doc = DomArena::new();
    let built = build(&mut doc, args!["div", ["span", "span"]]).unwrap();

    let expected = doc.create_element("div");
    for _ in 0..2 {
        let span = doc.create_element("span");
        doc.append_child(expected, span).unwrap();
    }
    assert!(doc.is_equal_node(expected, built));
}

#[test]
fn test_creates_fragment_with_three_divs() {
    let mut doc = DomArena::new();
    let built = build(&mut doc, args!["div", "div", "div"]).unwrap();

    let expected = doc.create_fragment();
    for _ in 0..3 {
        let div = doc.create_element("div");
        doc.append_child(expected, div).unwrap();
    }
    assert!(doc.is_equal_node(expected, built));

    let fresh = doc.create_element("div");
    let children = NodeApi::children(&doc, built).unwrap();
    assert_eq!(children.len(), 3);
    assert!(children.iter().all(|&child| doc.is_equal_node(child, fresh)));
}

#[test]
fn test_joins_classes_from_selector_and_mapping() {
    let mut doc = DomArena::new();
    let attrs = Attrs::new().with("class", "one").with("className", "two");
    let built = build(&mut doc, args!["div.three", attrs]).unwrap();

    let mut classes = doc.class_list(built);
    classes.sort();
    assert_eq!(classes, vec!["one", "three", "two"]);
    // Selector classes first, then `class`, then `className`
    assert_eq!(doc.attribute(built, "class").as_deref(), Some("three one two"));
}

#[test]
fn test_duplicate_classes_are_added_once() {
    let mut doc = DomArena::new();
    let attrs = Attrs::new().with("class", "a b").with("className", "b c");
    let built = build(&mut doc, args!["p.a.a", attrs]).unwrap();

    assert_eq!(doc.class_list(built), vec!["a", "b", "c"]);
}

#[test]
fn test_sets_attrs_on_existing_element() {
    let mut doc = DomArena::new();
    let existing = doc.create_element("div");
    let returned = build(
        &mut doc,
        vec![BuildArg::node(existing), Attrs::new().with("id", "some-id").into()],
    )
    .unwrap();

    assert_eq!(returned, existing);
    let expected = doc.create_element("div");
    doc.set_id(expected, "some-id").unwrap();
    assert!(doc.is_equal_node(expected, existing));
}

#[test]
fn test_empty_text_shorthand_matches_text_key() {
    let mut doc = DomArena::new();
    let shorthand = build(&mut doc, args!["div "]).unwrap();
    let from_attrs = build(&mut doc, args!["div", Attrs::new().with("text", "")]).unwrap();

    let expected = with_text(&mut doc, "div", "");
    assert!(doc.is_equal_node(expected, shorthand));
    assert!(doc.is_equal_node(expected, from_attrs));
    assert_eq!(doc.children(shorthand).unwrap().len(), 1);
}

#[test]
fn test_selector_text_wins_over_text_key() {
    let mut doc = DomArena::new();
    let attrs = Attrs::new().with("text", "From key");
    let built = build(&mut doc, args!["p From selector", attrs]).unwrap();

    assert_eq!(doc.text_content(built).unwrap(), "From selector");
}

#[test]
fn test_mapping_attr_wins_over_selector_attr() {
    let mut doc = DomArena::new();
    let attrs = Attrs::new().with("href", "/new");
    let built = build(&mut doc, args!["a[href=/old][rel=next]", attrs]).unwrap();

    assert_eq!(to_string(&doc, built).unwrap(), "<a href=\"/new\" rel=\"next\"></a>");
}

#[test]
fn test_allows_uppercase_in_selectors() {
    let mut doc = DomArena::new();
    let built = build(&mut doc, args![r#"div#someId.someClass[attrName="attrValue"]"#]).unwrap();

    let expected = doc.create_element("div");
    doc.set_id(expected, "someId").unwrap();
    doc.class_list_add(expected, "someClass").unwrap();
    doc.set_attribute(expected, "attrName", "attrValue").unwrap();
    assert!(doc.is_equal_node(expected, built));
}

#[test]
fn test_updates_existing_element_children() {
    let mut doc = DomArena::new();
    let mut title = "Some Title".to_string();
    let text = "Some lengthy text";

    let built = build(
        &mut doc,
        args!["div", vec![Child::from(format!("h1 {title}")), Child::from(format!("p {text}"))]],
    )
    .unwrap();

    let expected1 = doc.create_element("div");
    let h1 = with_text(&mut doc, "h1", &title);
    let p = with_text(&mut doc, "p", text);
    doc.append_child(expected1, h1).unwrap();
    doc.append_child(expected1, p).unwrap();
    assert!(doc.is_equal_node(expected1, built));

    title = "Some Changed Title".to_string();
    build(
        &mut doc,
        vec![
            BuildArg::node(built),
            BuildArg::Children(vec![
                Child::from(format!("h1 {title}")),
                Child::from(format!("p {text}")),
            ]),
        ],
    )
    .unwrap();

    let expected2 = doc.create_element("div");
    let h1 = with_text(&mut doc, "h1", &title);
    let p = with_text(&mut doc, "p", text);
    doc.append_child(expected2, h1).unwrap();
    doc.append_child(expected2, p).unwrap();
    assert!(doc.is_equal_node(expected2, built));
}

#[test]
fn test_update_replaces_children() {
    let mut d = Domator::new(DomArena::new());
    let list = d.build(args!["ul", ["li A", "li B"]]).unwrap();

    let same = d.update(list, args![["li C"]]).unwrap();
    assert_eq!(same, list);
    assert_eq!(d.to_string(list).unwrap(), "<ul><li>C</li></ul>");

    // An explicit empty child list clears the content
    d.update(list, vec![BuildArg::Children(vec![])]).unwrap();
    assert_eq!(d.to_string(list).unwrap(), "<ul></ul>");
}

#[test]
fn test_update_without_content_keeps_children() {
    let mut d = Domator::new(DomArena::new());
    let list = d.build(args!["ul", ["li A"]]).unwrap();

    d.update(list, args![".open"]).unwrap();
    assert_eq!(d.to_string(list).unwrap(), "<ul class=\"open\"><li>A</li></ul>");
}

#[test]
fn test_nested_builds_and_lists() {
    let mut doc = DomArena::new();
    let link = build(&mut doc, args!["a[href=/home] Home"]).unwrap();
    let nav = build(
        &mut doc,
        vec![
            "nav".into(),
            BuildArg::Children(vec![
                Child::node(link),
                Child::List(vec![Child::from("span.sep"), Child::text(" | ")]),
                Child::from("a[href=/about] About"),
            ]),
        ],
    )
    .unwrap();

    assert_eq!(
        to_string(&doc, nav).unwrap(),
        "<nav><a href=\"/home\">Home</a><span class=\"sep\"></span> | <a href=\"/about\">About</a></nav>"
    );
}

#[test]
fn test_fragment_as_child_is_unpacked() {
    let mut doc = DomArena::new();
    let items = build(&mut doc, args!["li 1", "li 2"]).unwrap();
    let list = build(&mut doc, vec!["ol".into(), BuildArg::node(items)]).unwrap();

    assert_eq!(to_string(&doc, list).unwrap(), "<ol><li>1</li><li>2</li></ol>");
    assert!(doc.children(items).unwrap().is_empty());
}

#[test]
fn test_to_string_round_trips_content() {
    let mut doc = DomArena::new();
    let built = build(&mut doc, args!["div"]).unwrap();
    assert_eq!(to_string(&doc, built).unwrap(), "<div></div>");

    let built = build(
        &mut doc,
        args!["p#intro.lead[data-x=\"1\"] Fish & Chips", Attrs::new().with("title", "a<b")],
    )
    .unwrap();
    assert_eq!(
        to_string(&doc, built).unwrap(),
        "<p id=\"intro\" class=\"lead\" data-x=\"1\" title=\"a&lt;b\">Fish &amp; Chips</p>"
    );
}

#[test]
fn test_parse_selector_text_only_and_trailing_space() {
    let only_text = parse_selector(" Hello!").unwrap();
    assert_eq!(only_text.tag, None);
    assert_eq!(only_text.text.as_deref(), Some("Hello!"));

    let trailing = parse_selector("div ").unwrap();
    assert_eq!(trailing.tag.as_deref(), Some("div"));
    assert_eq!(trailing.text.as_deref(), Some(""));
}

#[test]
fn test_error_cases() {
    let mut doc = DomArena::new();

    assert!(matches!(
        build(&mut doc, args![""]),
        Err(DomatorError::Parse(domator::ParseError::Empty))
    ));
    assert!(matches!(
        build(&mut doc, args![Attrs::new().with("text", "x")]),
        Err(DomatorError::Target(_))
    ));
    assert!(doc.is_empty());
}

#[test]
fn test_build_json_and_set_document() {
    let mut d: Domator<DomArena> = Domator::default();
    let value = serde_json::json!([
        "ul.menu",
        { "role": "menu", "children": ["li.item Home", ["li.item About"]] }
    ]);

    let menu = d.build_json(&value).unwrap();
    assert_eq!(
        d.to_string(menu).unwrap(),
        "<ul class=\"menu\" role=\"menu\"><li class=\"item\">Home</li><li class=\"item\">About</li></ul>"
    );

    let previous = d.set_document(DomArena::new());
    assert!(!previous.is_empty());
    assert!(d.document().is_empty());
}

#[test]
fn test_failed_update_leaves_target_untouched() {
    let mut d = Domator::new(DomArena::new());
    let outer = d.build(args!["div", ["span Keep"]]).unwrap();
    let inner = NodeApi::children(d.document(), outer).unwrap()[0];

    let result = d.update(
        inner,
        vec![".x".into(), BuildArg::Children(vec![Child::node(outer)])],
    );

    assert!(matches!(result, Err(DomatorError::InvalidArgument { .. })));
    assert_eq!(d.to_string(inner).unwrap(), "<span>Keep</span>");
}

#[test]
fn test_json_children_key_is_never_an_attribute() {
    let mut d: Domator<DomArena> = Domator::default();

    let err = d
        .build_json(&serde_json::json!(["ul", { "children": "li" }]))
        .unwrap_err();
    assert!(matches!(err, DomatorError::InvalidArgument { index: 1, .. }));
    assert!(d.document().is_empty());

    let list = d
        .build_json(&serde_json::json!(["ul", { "children": ["li"] }]))
        .unwrap();
    assert_eq!(d.to_string(list).unwrap(), "<ul><li></li></ul>");
}

#[test]
fn test_selector_class_attribute_keeps_selector_classes() {
    let mut doc = DomArena::new();
    let built = build(&mut doc, args!["div.a[class=b]"]).unwrap();

    assert_eq!(to_string(&doc, built).unwrap(), "<div class=\"a b\"></div>");
}
