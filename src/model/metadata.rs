//! The `<metadata>` element and its supporting types: information
//! about the file itself rather than any point in it.

use crate::model::{Bounds, Link};
use crate::read::{attr, elem, leaf, list, opt, ElementReader};
use crate::write::XmlWriter;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// An email address, stored split as `<email id="bill" domain="example.com"/>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    /// The part before the `@`.
    pub id: String,
    /// The part after the `@`.
    pub domain: String,
}

impl Email {
    /// The full address, `id@domain`.
    pub fn address(&self) -> String {
        format!("{}@{}", self.id, self.domain)
    }

    fn reader() -> impl ElementReader<Value = Email> {
        elem(
            "email",
            (attr::<String>("id"), attr::<String>("domain")),
            (),
            |(id, domain), ()| Ok(Email { id, domain }),
        )
    }

    fn write_xml<W: Write>(&self, xml: &mut XmlWriter<W>) -> io::Result<()> {
        xml.start_element("email")?;
        xml.write_attribute("id", &self.id)?;
        xml.write_attribute("domain", &self.domain)?;
        xml.end_element()
    }
}

/// The person or organization that authored the file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Person {
    /// The author's name.
    pub name: Option<String>,
    /// The author's email address.
    pub email: Option<Email>,
    /// A link to the author's website.
    pub link: Option<Link>,
}

impl Person {
    fn reader() -> impl ElementReader<Value = Person> {
        elem(
            "author",
            (),
            (
                opt(leaf::<String>("name")),
                opt(Email::reader()),
                opt(Link::reader()),
            ),
            |(), (name, email, link)| Ok(Person { name, email, link }),
        )
    }

    fn write_xml<W: Write>(&self, xml: &mut XmlWriter<W>) -> io::Result<()> {
        xml.start_element("author")?;
        xml.opt_leaf("name", &self.name)?;
        if let Some(email) = &self.email {
            email.write_xml(xml)?;
        }
        if let Some(link) = &self.link {
            link.write_xml(xml)?;
        }
        xml.end_element()
    }
}

/// Copyright and license information governing use of the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Copyright {
    /// The copyright holder.
    pub author: String,
    /// The year of copyright.
    pub year: Option<i32>,
    /// A URL pointing to the license text.
    pub license: Option<String>,
}

impl Copyright {
    /// Creates a copyright record naming only the holder.
    pub fn new(author: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            year: None,
            license: None,
        }
    }

    fn reader() -> impl ElementReader<Value = Copyright> {
        elem(
            "copyright",
            (attr::<String>("author"),),
            (opt(leaf::<i32>("year")), opt(leaf::<String>("license"))),
            |(author,), (year, license)| {
                Ok(Copyright {
                    author,
                    year,
                    license,
                })
            },
        )
    }

    fn write_xml<W: Write>(&self, xml: &mut XmlWriter<W>) -> io::Result<()> {
        xml.start_element("copyright")?;
        xml.write_attribute("author", &self.author)?;
        xml.opt_leaf("year", &self.year)?;
        xml.opt_leaf("license", &self.license)?;
        xml.end_element()
    }
}

/// Information about the GPX file: authorship, timestamps, extent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// The name of the file.
    pub name: Option<String>,
    /// A description of the contents.
    pub description: Option<String>,
    /// The person or organization who created the file.
    pub author: Option<Person>,
    /// Copyright and license information.
    pub copyright: Option<Copyright>,
    /// Links to external information about the file.
    pub links: Vec<Link>,
    /// The creation time of the file.
    pub time: Option<DateTime<Utc>>,
    /// Comma-separated keywords for classification.
    pub keywords: Option<String>,
    /// The lat/lon extent covered by the file.
    pub bounds: Option<Bounds>,
}

impl Metadata {
    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.author.is_none()
            && self.copyright.is_none()
            && self.links.is_empty()
            && self.time.is_none()
            && self.keywords.is_none()
            && self.bounds.is_none()
    }

    pub(crate) fn reader() -> impl ElementReader<Value = Metadata> {
        elem(
            "metadata",
            (),
            (
                opt(leaf::<String>("name")),
                opt(leaf::<String>("desc")),
                opt(Person::reader()),
                opt(Copyright::reader()),
                list(Link::reader()),
                opt(leaf::<DateTime<Utc>>("time")),
                opt(leaf::<String>("keywords")),
                opt(Bounds::reader()),
            ),
            |(), (name, description, author, copyright, links, time, keywords, bounds)| {
                Ok(Metadata {
                    name,
                    description,
                    author,
                    copyright,
                    links,
                    time,
                    keywords,
                    bounds,
                })
            },
        )
    }

    pub(crate) fn write_xml<W: Write>(&self, xml: &mut XmlWriter<W>) -> io::Result<()> {
        xml.start_element("metadata")?;
        xml.opt_leaf("name", &self.name)?;
        xml.opt_leaf("desc", &self.description)?;
        if let Some(author) = &self.author {
            author.write_xml(xml)?;
        }
        if let Some(copyright) = &self.copyright {
            copyright.write_xml(xml)?;
        }
        for link in &self.links {
            link.write_xml(xml)?;
        }
        xml.opt_leaf("time", &self.time)?;
        xml.opt_leaf("keywords", &self.keywords)?;
        if let Some(bounds) = &self.bounds {
            bounds.write_xml(xml)?;
        }
        xml.end_element()
    }
}
