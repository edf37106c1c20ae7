//! Schema-directed element readers.
//!
//! An element reader is an immutable descriptor of one element shape:
//! the expected tag, the attributes to coerce, the declared children in
//! wire order, and a construction function that assembles the domain
//! value from the completed slots. Readers compose: a parent's child
//! list is itself a tuple of readers, so the whole document grammar is
//! one reader built from smaller ones.
//!
//! Child slots are statically shaped: every element's slot array is a
//! typed tuple, so a reader that forgets a position or mixes up an
//! index does not compile. A child position is required (`req`),
//! optional (`opt`, absent yields `None`) or repeated (`list`, absent
//! yields an empty `Vec`). The `Vec`-versus-`None`
//! distinction is what keeps "field omitted" and "field present but
//! empty" apart across a round trip.
//!
//! Dispatch is in declared order: each position inspects the current
//! token, consumes it on a tag match, and passes it along untouched
//! otherwise. Absence of one child never blocks a later one. An element
//! matching no remaining declared child is handled per the reader's
//! [`UnknownPolicy`], fixed at construction.

use crate::cursor::{Cursor, Token};
use crate::error::{Error, Position, Result};
use crate::reader::Attribute;
use crate::scalar::Scalar;
use std::marker::PhantomData;

/// How an element reader treats a child element that matches none of
/// its declared children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownPolicy {
    /// Consume and ignore the whole subtree. This is the default:
    /// GPX files routinely carry `<extensions>` and vendor elements.
    Skip,
    /// Fail with `UnexpectedElement`.
    Reject,
}

/// Parses exactly one element instance into a typed value.
///
/// `read` requires the cursor to be at the matching start tag; on
/// success the cursor has advanced exactly past the consumed subtree,
/// and on failure the whole parse aborts.
pub trait ElementReader {
    /// The domain value this reader produces.
    type Value;

    /// The tag this reader matches.
    fn tag(&self) -> &'static str;

    /// Parses one element instance.
    fn read(&self, cur: &mut Cursor<'_>) -> Result<Self::Value>;
}

/// One declared child position of a structured element.
pub trait ChildReader {
    /// The slot this position contributes to the construction function.
    type Slot;

    /// The tag this position matches.
    fn tag(&self) -> &'static str;

    /// Consumes every occurrence belonging to this position. The cursor
    /// is at a start tag matching [`ChildReader::tag`].
    fn read(&self, cur: &mut Cursor<'_>) -> Result<Self::Slot>;

    /// The slot recorded when the position never appears.
    fn absent(&self, pos: Position) -> Result<Self::Slot>;
}

/// An optional child: at most one occurrence, absent yields `None`.
pub struct Opt<R>(R);

/// Wraps a reader as an optional child position.
pub fn opt<R: ElementReader>(reader: R) -> Opt<R> {
    Opt(reader)
}

impl<R: ElementReader> ChildReader for Opt<R> {
    type Slot = Option<R::Value>;

    fn tag(&self) -> &'static str {
        self.0.tag()
    }

    fn read(&self, cur: &mut Cursor<'_>) -> Result<Self::Slot> {
        self.0.read(cur).map(Some)
    }

    fn absent(&self, _pos: Position) -> Result<Self::Slot> {
        Ok(None)
    }
}

/// A required child: exactly one occurrence.
pub struct Req<R>(R);

/// Wraps a reader as a required child position.
pub fn req<R: ElementReader>(reader: R) -> Req<R> {
    Req(reader)
}

impl<R: ElementReader> ChildReader for Req<R> {
    type Slot = R::Value;

    fn tag(&self) -> &'static str {
        self.0.tag()
    }

    fn read(&self, cur: &mut Cursor<'_>) -> Result<Self::Slot> {
        self.0.read(cur)
    }

    fn absent(&self, pos: Position) -> Result<Self::Slot> {
        Err(Error::schema(format!("missing required element <{}>", self.0.tag()))
            .with_position(pos))
    }
}

/// A repeated child: zero or more consecutive occurrences, collected in
/// order. The slot is always a `Vec`, never an absent marker.
pub struct ListOf<R>(R);

/// Wraps a reader as a repeated child position.
pub fn list<R: ElementReader>(reader: R) -> ListOf<R> {
    ListOf(reader)
}

impl<R: ElementReader> ChildReader for ListOf<R> {
    type Slot = Vec<R::Value>;

    fn tag(&self) -> &'static str {
        self.0.tag()
    }

    fn read(&self, cur: &mut Cursor<'_>) -> Result<Self::Slot> {
        let mut items = vec![self.0.read(cur)?];
        while cur.at_start(self.0.tag())? {
            items.push(self.0.read(cur)?);
        }
        Ok(items)
    }

    fn absent(&self, _pos: Position) -> Result<Self::Slot> {
        Ok(Vec::new())
    }
}

/// A leaf element holding only scalar text: `<tag>text</tag>`.
pub struct Leaf<T> {
    tag: &'static str,
    _marker: PhantomData<fn() -> T>,
}

/// Creates a leaf reader coercing the element text to `T`.
pub fn leaf<T: Scalar>(tag: &'static str) -> Leaf<T> {
    Leaf {
        tag,
        _marker: PhantomData,
    }
}

impl<T: Scalar> ElementReader for Leaf<T> {
    type Value = T;

    fn tag(&self) -> &'static str {
        self.tag
    }

    fn read(&self, cur: &mut Cursor<'_>) -> Result<T> {
        let pos = cur.position();
        cur.expect_start(self.tag)?;
        let text = cur.take_text()?;
        cur.expect_end(self.tag)?;
        T::parse_text(&text)
            .map_err(|reason| Error::invalid_value(self.tag.to_string(), text, reason).with_position(pos))
    }
}

/// A required attribute coerced to `T`.
pub struct Attr<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

/// Creates a required attribute descriptor.
pub fn attr<T: Scalar>(name: &'static str) -> Attr<T> {
    Attr {
        name,
        _marker: PhantomData,
    }
}

/// An optional attribute coerced to `T`.
pub struct OptAttr<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

/// Creates an optional attribute descriptor.
pub fn opt_attr<T: Scalar>(name: &'static str) -> OptAttr<T> {
    OptAttr {
        name,
        _marker: PhantomData,
    }
}

/// One declared attribute of an element.
pub trait AttrReader {
    /// The value this attribute contributes to the construction function.
    type Value;

    /// Coerces this attribute from the start tag's attribute list.
    fn read(&self, attrs: &[Attribute<'_>], pos: Position) -> Result<Self::Value>;
}

fn find_attr<'v>(attrs: &'v [Attribute<'_>], name: &str) -> Option<&'v str> {
    attrs
        .iter()
        .find(|a| a.name.as_ref() == name)
        .map(|a| a.value.as_ref())
}

impl<T: Scalar> AttrReader for Attr<T> {
    type Value = T;

    fn read(&self, attrs: &[Attribute<'_>], pos: Position) -> Result<T> {
        let raw = find_attr(attrs, self.name)
            .ok_or_else(|| Error::missing_attribute(self.name).with_position(pos))?;
        T::parse_text(raw).map_err(|reason| {
            Error::invalid_value(self.name.to_string(), raw.to_string(), reason).with_position(pos)
        })
    }
}

impl<T: Scalar> AttrReader for OptAttr<T> {
    type Value = Option<T>;

    fn read(&self, attrs: &[Attribute<'_>], pos: Position) -> Result<Option<T>> {
        match find_attr(attrs, self.name) {
            None => Ok(None),
            Some(raw) => T::parse_text(raw)
                .map(Some)
                .map_err(|reason| {
                    Error::invalid_value(self.name.to_string(), raw.to_string(), reason)
                        .with_position(pos)
                }),
        }
    }
}

/// The declared attribute tuple of an element reader.
pub trait AttrSet {
    /// The coerced attribute values, positionally.
    type Values;

    /// Coerces all declared attributes. Undeclared attributes (foreign
    /// namespace noise) are ignored.
    fn read_all(&self, attrs: &[Attribute<'_>], pos: Position) -> Result<Self::Values>;
}

impl AttrSet for () {
    type Values = ();

    fn read_all(&self, _attrs: &[Attribute<'_>], _pos: Position) -> Result<()> {
        Ok(())
    }
}

macro_rules! impl_attr_set {
    ($($a:ident $idx:tt),+) => {
        impl<$($a: AttrReader),+> AttrSet for ($($a,)+) {
            type Values = ($($a::Value,)+);

            fn read_all(&self, attrs: &[Attribute<'_>], pos: Position) -> Result<Self::Values> {
                Ok(($(self.$idx.read(attrs, pos)?,)+))
            }
        }
    };
}

impl_attr_set!(A0 0);
impl_attr_set!(A0 0, A1 1);
impl_attr_set!(A0 0, A1 1, A2 2);
impl_attr_set!(A0 0, A1 1, A2 2, A3 3);

/// Reads one child position: consumes unknown elements per policy until
/// the position either matches, is deferred past, or the content ends.
fn read_slot<R: ChildReader>(
    reader: &R,
    cur: &mut Cursor<'_>,
    rest: &[&'static str],
    policy: UnknownPolicy,
) -> Result<R::Slot> {
    enum Step {
        Read,
        Absent,
        Skip,
        Reject(String),
    }

    loop {
        let step = match cur.peek()? {
            Token::Start { name, .. } => {
                if name.as_ref() == reader.tag() {
                    Step::Read
                } else if rest.contains(&name.as_ref()) {
                    Step::Absent
                } else {
                    match policy {
                        UnknownPolicy::Skip => Step::Skip,
                        UnknownPolicy::Reject => Step::Reject(name.to_string()),
                    }
                }
            }
            _ => Step::Absent,
        };

        match step {
            Step::Read => return reader.read(cur),
            Step::Absent => return reader.absent(cur.position()),
            Step::Skip => cur.skip_subtree()?,
            Step::Reject(name) => {
                return Err(Error::unexpected_element(name).with_position(cur.position()))
            }
        }
    }
}

/// The declared child tuple of an element reader.
pub trait ChildSet {
    /// The completed slot tuple handed to the construction function.
    type Slots;

    /// Reads all declared child positions in order.
    fn read_all(&self, cur: &mut Cursor<'_>, policy: UnknownPolicy) -> Result<Self::Slots>;
}

impl ChildSet for () {
    type Slots = ();

    fn read_all(&self, _cur: &mut Cursor<'_>, _policy: UnknownPolicy) -> Result<()> {
        Ok(())
    }
}

macro_rules! impl_child_set {
    ($($r:ident $idx:tt),+) => {
        impl<$($r: ChildReader),+> ChildSet for ($($r,)+) {
            type Slots = ($($r::Slot,)+);

            fn read_all(&self, cur: &mut Cursor<'_>, policy: UnknownPolicy) -> Result<Self::Slots> {
                let tags = [$(self.$idx.tag()),+];
                Ok(($(read_slot(&self.$idx, cur, &tags[$idx + 1..], policy)?,)+))
            }
        }
    };
}

impl_child_set!(R0 0);
impl_child_set!(R0 0, R1 1);
impl_child_set!(R0 0, R1 1, R2 2);
impl_child_set!(R0 0, R1 1, R2 2, R3 3);
impl_child_set!(R0 0, R1 1, R2 2, R3 3, R4 4);
impl_child_set!(R0 0, R1 1, R2 2, R3 3, R4 4, R5 5);
impl_child_set!(R0 0, R1 1, R2 2, R3 3, R4 4, R5 5, R6 6);
impl_child_set!(R0 0, R1 1, R2 2, R3 3, R4 4, R5 5, R6 6, R7 7);
impl_child_set!(R0 0, R1 1, R2 2, R3 3, R4 4, R5 5, R6 6, R7 7, R8 8);
impl_child_set!(R0 0, R1 1, R2 2, R3 3, R4 4, R5 5, R6 6, R7 7, R8 8, R9 9);
impl_child_set!(R0 0, R1 1, R2 2, R3 3, R4 4, R5 5, R6 6, R7 7, R8 8, R9 9, R10 10);
impl_child_set!(R0 0, R1 1, R2 2, R3 3, R4 4, R5 5, R6 6, R7 7, R8 8, R9 9, R10 10, R11 11);
impl_child_set!(
    R0 0, R1 1, R2 2, R3 3, R4 4, R5 5, R6 6, R7 7, R8 8, R9 9, R10 10, R11 11, R12 12
);
impl_child_set!(
    R0 0, R1 1, R2 2, R3 3, R4 4, R5 5, R6 6, R7 7, R8 8, R9 9, R10 10, R11 11, R12 12, R13 13
);
impl_child_set!(
    R0 0, R1 1, R2 2, R3 3, R4 4, R5 5, R6 6, R7 7, R8 8, R9 9, R10 10, R11 11, R12 12, R13 13,
    R14 14
);
impl_child_set!(
    R0 0, R1 1, R2 2, R3 3, R4 4, R5 5, R6 6, R7 7, R8 8, R9 9, R10 10, R11 11, R12 12, R13 13,
    R14 14, R15 15
);
impl_child_set!(
    R0 0, R1 1, R2 2, R3 3, R4 4, R5 5, R6 6, R7 7, R8 8, R9 9, R10 10, R11 11, R12 12, R13 13,
    R14 14, R15 15, R16 16
);
impl_child_set!(
    R0 0, R1 1, R2 2, R3 3, R4 4, R5 5, R6 6, R7 7, R8 8, R9 9, R10 10, R11 11, R12 12, R13 13,
    R14 14, R15 15, R16 16, R17 17
);
impl_child_set!(
    R0 0, R1 1, R2 2, R3 3, R4 4, R5 5, R6 6, R7 7, R8 8, R9 9, R10 10, R11 11, R12 12, R13 13,
    R14 14, R15 15, R16 16, R17 17, R18 18
);
impl_child_set!(
    R0 0, R1 1, R2 2, R3 3, R4 4, R5 5, R6 6, R7 7, R8 8, R9 9, R10 10, R11 11, R12 12, R13 13,
    R14 14, R15 15, R16 16, R17 17, R18 18, R19 19
);

/// A structured element reader: tag, attributes, ordered children,
/// construction function.
pub struct Elem<A, C, F, T> {
    tag: &'static str,
    attrs: A,
    children: C,
    build: F,
    policy: UnknownPolicy,
    _marker: PhantomData<fn() -> T>,
}

/// Creates a structured element reader.
///
/// `build` receives the coerced attribute tuple and the completed child
/// slot tuple; its rejection surfaces as the parse error (use
/// [`Error::domain`] for cross-field constraints). The default
/// unknown-element policy is [`UnknownPolicy::Skip`].
pub fn elem<A, C, F, T>(tag: &'static str, attrs: A, children: C, build: F) -> Elem<A, C, F, T>
where
    A: AttrSet,
    C: ChildSet,
    F: Fn(A::Values, C::Slots) -> Result<T>,
{
    Elem {
        tag,
        attrs,
        children,
        build,
        policy: UnknownPolicy::Skip,
        _marker: PhantomData,
    }
}

impl<A, C, F, T> Elem<A, C, F, T> {
    /// Switches this reader to fail with `UnexpectedElement` on any
    /// child matching none of the declared positions.
    pub fn rejecting_unknown(mut self) -> Self {
        self.policy = UnknownPolicy::Reject;
        self
    }
}

impl<A, C, F, T> ElementReader for Elem<A, C, F, T>
where
    A: AttrSet,
    C: ChildSet,
    F: Fn(A::Values, C::Slots) -> Result<T>,
{
    type Value = T;

    fn tag(&self) -> &'static str {
        self.tag
    }

    fn read(&self, cur: &mut Cursor<'_>) -> Result<T> {
        let pos = cur.position();
        let raw_attrs = cur.expect_start(self.tag)?;
        let values = self.attrs.read_all(&raw_attrs, pos)?;
        let slots = self.children.read_all(cur, self.policy)?;
        self.finish_children(cur)?;
        cur.expect_end(self.tag)?;
        (self.build)(values, slots)
    }
}

impl<A, C, F, T> Elem<A, C, F, T> {
    /// Consumes whatever remains before the end tag: trailing unknown
    /// elements per policy; stray text is always a schema violation
    /// since it cannot be a forward-compatible extension.
    fn finish_children(&self, cur: &mut Cursor<'_>) -> Result<()> {
        enum Step {
            Done,
            Skip,
            Reject(String),
            Text,
        }

        loop {
            let step = match cur.peek()? {
                Token::End { .. } | Token::Eof => Step::Done,
                Token::Start { name, .. } => match self.policy {
                    UnknownPolicy::Skip => Step::Skip,
                    UnknownPolicy::Reject => Step::Reject(name.to_string()),
                },
                Token::Text(_) => Step::Text,
            };

            match step {
                Step::Done => return Ok(()),
                Step::Skip => cur.skip_subtree()?,
                Step::Reject(name) => {
                    return Err(Error::unexpected_element(name).with_position(cur.position()))
                }
                Step::Text => {
                    return Err(Error::schema(format!(
                        "unexpected text content in <{}>",
                        self.tag
                    ))
                    .with_position(cur.position()))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[derive(Debug, PartialEq)]
    struct Item {
        id: u32,
        label: Option<String>,
        tags: Vec<String>,
        note: Option<String>,
    }

    fn item_reader() -> impl ElementReader<Value = Item> {
        elem(
            "item",
            (attr::<u32>("id"),),
            (
                opt(leaf::<String>("label")),
                list(leaf::<String>("tag")),
                opt(leaf::<String>("note")),
            ),
            |(id,), (label, tags, note)| {
                Ok(Item {
                    id,
                    label,
                    tags,
                    note,
                })
            },
        )
    }

    fn parse_item(xml: &str) -> Result<Item> {
        let mut cur = Cursor::new(xml);
        let item = item_reader().read(&mut cur)?;
        cur.expect_eof()?;
        Ok(item)
    }

    #[test]
    fn test_all_fields_present() {
        let item = parse_item(
            r#"<item id="7"><label>a</label><tag>x</tag><tag>y</tag><note>n</note></item>"#,
        )
        .unwrap();
        assert_eq!(
            item,
            Item {
                id: 7,
                label: Some("a".to_string()),
                tags: vec!["x".to_string(), "y".to_string()],
                note: Some("n".to_string()),
            }
        );
    }

    #[test]
    fn test_optional_independence() {
        // Omitting one optional child leaves every other slot untouched.
        let item = parse_item(r#"<item id="7"><tag>x</tag><note>n</note></item>"#).unwrap();
        assert_eq!(item.label, None);
        assert_eq!(item.tags, vec!["x".to_string()]);
        assert_eq!(item.note, Some("n".to_string()));

        let item = parse_item(r#"<item id="7"><label>a</label><tag>x</tag></item>"#).unwrap();
        assert_eq!(item.label, Some("a".to_string()));
        assert_eq!(item.note, None);
    }

    #[test]
    fn test_repeated_field_never_absent() {
        let item = parse_item(r#"<item id="7"/>"#).unwrap();
        assert!(item.tags.is_empty());
        assert_eq!(item.label, None);
    }

    #[test]
    fn test_wrong_tag_is_schema_violation() {
        let mut cur = Cursor::new("<entry id=\"1\"/>");
        let err = item_reader().read(&mut cur).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::SchemaViolation(_)));
    }

    #[test]
    fn test_missing_required_attribute() {
        let err = parse_item("<item/>").unwrap_err();
        match err.kind() {
            ErrorKind::MissingAttribute(name) => assert_eq!(name, "id"),
            other => panic!("expected MissingAttribute, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_attribute_names_raw_text() {
        let err = parse_item(r#"<item id="abc"/>"#).unwrap_err();
        match err.kind() {
            ErrorKind::InvalidValue { name, raw, .. } => {
                assert_eq!(name, "id");
                assert_eq!(raw, "abc");
            }
            other => panic!("expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_leaf_names_raw_text() {
        #[derive(Debug, PartialEq)]
        struct Reading(Option<f64>);

        let reader = elem(
            "reading",
            (),
            (opt(leaf::<f64>("value")),),
            |(), (value,)| Ok(Reading(value)),
        );

        let mut cur = Cursor::new("<reading><value>oops</value></reading>");
        let err = reader.read(&mut cur).unwrap_err();
        match err.kind() {
            ErrorKind::InvalidValue { name, raw, .. } => {
                assert_eq!(name, "value");
                assert_eq!(raw, "oops");
            }
            other => panic!("expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_element_skipped_by_default() {
        let item = parse_item(
            r#"<item id="7"><extensions><depth>3</depth></extensions><tag>x</tag></item>"#,
        )
        .unwrap();
        assert_eq!(item.tags, vec!["x".to_string()]);
    }

    #[test]
    fn test_trailing_unknown_element_skipped() {
        let item = parse_item(r#"<item id="7"><tag>x</tag><vendor attr="1"/></item>"#).unwrap();
        assert_eq!(item.tags, vec!["x".to_string()]);
    }

    #[test]
    fn test_unknown_element_rejected_when_strict() {
        let reader = elem(
            "item",
            (attr::<u32>("id"),),
            (opt(leaf::<String>("label")),),
            |(id,), (label,)| {
                Ok(Item {
                    id,
                    label,
                    tags: Vec::new(),
                    note: None,
                })
            },
        )
        .rejecting_unknown();

        let mut cur = Cursor::new(r#"<item id="7"><vendor/></item>"#);
        let err = reader.read(&mut cur).unwrap_err();
        match err.kind() {
            ErrorKind::UnexpectedElement(name) => assert_eq!(name, "vendor"),
            other => panic!("expected UnexpectedElement, got {:?}", other),
        }
    }

    #[test]
    fn test_reordered_children_never_reassigned() {
        // "note" before "label": the label position defers, so label
        // ends up absent and the out-of-order element is skipped, never
        // read into a different field.
        let item =
            parse_item(r#"<item id="7"><note>n</note><label>a</label></item>"#).unwrap();
        assert_eq!(item.note, Some("n".to_string()));
        assert_eq!(item.label, None);
    }

    #[test]
    fn test_required_child_missing() {
        let reader = elem(
            "pair",
            (),
            (req(leaf::<u32>("first")), req(leaf::<u32>("second"))),
            |(), (first, second)| Ok((first, second)),
        );

        let mut cur = Cursor::new("<pair><first>1</first></pair>");
        let err = reader.read(&mut cur).unwrap_err();
        match err.kind() {
            ErrorKind::SchemaViolation(msg) => assert!(msg.contains("second")),
            other => panic!("expected SchemaViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_stray_text_rejected() {
        let err = parse_item(r#"<item id="7">loose text</item>"#).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::SchemaViolation(_)));
    }

    #[test]
    fn test_construction_function_rejection_is_domain_error() {
        let reader = elem(
            "range",
            (attr::<u32>("lo"), attr::<u32>("hi")),
            (),
            |(lo, hi), ()| {
                if lo > hi {
                    return Err(Error::domain("lo must not exceed hi"));
                }
                Ok((lo, hi))
            },
        );

        let mut cur = Cursor::new(r#"<range lo="9" hi="3"/>"#);
        let err = reader.read(&mut cur).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::DomainValidation(_)));
    }

    #[test]
    fn test_nested_element_readers() {
        #[derive(Debug, PartialEq)]
        struct Outer {
            inners: Vec<Item>,
        }

        let reader = elem("outer", (), (list(item_reader()),), |(), (inners,)| {
            Ok(Outer { inners })
        });

        let mut cur =
            Cursor::new(r#"<outer><item id="1"/><item id="2"><tag>t</tag></item></outer>"#);
        let outer = reader.read(&mut cur).unwrap();
        assert_eq!(outer.inners.len(), 2);
        assert_eq!(outer.inners[0].id, 1);
        assert_eq!(outer.inners[1].tags, vec!["t".to_string()]);
    }

    #[test]
    fn test_optional_attribute() {
        let reader = elem(
            "node",
            (attr::<u32>("id"), opt_attr::<String>("name")),
            (),
            |(id, name), ()| Ok((id, name)),
        );

        let mut cur = Cursor::new(r#"<node id="1" name="alpha"/>"#);
        assert_eq!(
            reader.read(&mut cur).unwrap(),
            (1, Some("alpha".to_string()))
        );

        let mut cur = Cursor::new(r#"<node id="2"/>"#);
        assert_eq!(reader.read(&mut cur).unwrap(), (2, None));
    }

    #[test]
    fn test_undeclared_attributes_ignored() {
        let item = parse_item(r#"<item id="7" xmlns:x="urn:x" x:extra="1"/>"#).unwrap();
        assert_eq!(item.id, 7);
    }
}
