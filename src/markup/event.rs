use std::borrow::Cow;

/// A single `name="value"` pair from a start tag.
///
/// Names are lowercased by the tokenizer. A valueless attribute (`<a download>`)
/// carries an empty value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute<'a> {
    pub name: Cow<'a, str>,
    pub value: Cow<'a, str>,
}

impl<'a> Attribute<'a> {
    pub fn new(name: impl Into<Cow<'a, str>>, value: impl Into<Cow<'a, str>>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Events produced by a markup tokenizer, in document order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MarkupEvent<'a> {
    Text(Cow<'a, str>),
    StartTag {
        name: Cow<'a, str>,
        attributes: Vec<Attribute<'a>>,
    },
    EndTag {
        name: Cow<'a, str>,
    },
    SelfClosingTag {
        name: Cow<'a, str>,
        attributes: Vec<Attribute<'a>>,
    },
}

impl<'a> MarkupEvent<'a> {
    pub fn text(text: impl Into<Cow<'a, str>>) -> Self {
        MarkupEvent::Text(text.into())
    }

    pub fn start(name: impl Into<Cow<'a, str>>, attributes: Vec<Attribute<'a>>) -> Self {
        MarkupEvent::StartTag {
            name: name.into(),
            attributes,
        }
    }

    pub fn end(name: impl Into<Cow<'a, str>>) -> Self {
        MarkupEvent::EndTag { name: name.into() }
    }

    pub fn self_closing(name: impl Into<Cow<'a, str>>) -> Self {
        MarkupEvent::SelfClosingTag {
            name: name.into(),
            attributes: Vec::new(),
        }
    }
}

/// Looks up the first attribute called `name`.
pub fn attribute_value<'s>(attributes: &'s [Attribute<'_>], name: &str) -> Option<&'s str> {
    attributes
        .iter()
        .find(|attr| attr.name == name)
        .map(|attr| attr.value.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_lookup_returns_first_match() {
        let attrs = vec![
            Attribute::new("href", "https://a.example"),
            Attribute::new("class", "mention hashtag"),
            Attribute::new("href", "https://b.example"),
        ];
        assert_eq!(attribute_value(&attrs, "href"), Some("https://a.example"));
        assert_eq!(attribute_value(&attrs, "class"), Some("mention hashtag"));
        assert_eq!(attribute_value(&attrs, "rel"), None);
    }
}
