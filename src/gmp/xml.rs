use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tokio::io::AsyncBufRead;

use crate::errors::ReportError;

/// A parsed XML element. Text holds the element's own character data only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Trimmed text content.
    pub fn text(&self) -> &str {
        self.text.trim()
    }

    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Trimmed text of the first child called `name`, if it has any.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(Element::text).filter(|t| !t.is_empty())
    }

    /// Follow a slash-separated path of child names, taking the first match at each step.
    pub fn find(&self, path: &str) -> Option<&Element> {
        path.split('/')
            .filter(|s| !s.is_empty())
            .try_fold(self, |el, step| el.child(step))
    }
}

fn open_element(start: &BytesStart) -> Result<Element, ReportError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).to_string();
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| ReportError::Xml(format!("Bad attribute '{}': {}", key, e)))?
            .into_owned();
        attributes.push((key, value));
    }
    Ok(Element {
        name,
        attributes,
        ..Default::default()
    })
}

/// Builds an element tree from a stream of events.
#[derive(Debug, Default)]
struct TreeBuilder {
    stack: Vec<Element>,
    root: Option<Element>,
}

impl TreeBuilder {
    /// Feed one event. Returns `true` once the root element has closed.
    fn feed(&mut self, event: Event<'_>) -> Result<bool, ReportError> {
        match event {
            Event::Start(e) => self.stack.push(open_element(&e)?),
            Event::Empty(e) => {
                let el = open_element(&e)?;
                self.attach(el)?;
            }
            Event::End(_) => {
                let el = self
                    .stack
                    .pop()
                    .ok_or_else(|| ReportError::Xml("Unbalanced closing tag".into()))?;
                self.attach(el)?;
            }
            Event::Text(t) => {
                if let Some(current) = self.stack.last_mut() {
                    let text = t
                        .unescape()
                        .map_err(|e| ReportError::Xml(format!("Bad text content: {}", e)))?;
                    current.text.push_str(&text);
                }
            }
            Event::CData(c) => {
                if let Some(current) = self.stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&c));
                }
            }
            _ => {}
        }
        Ok(self.stack.is_empty() && self.root.is_some())
    }

    fn attach(&mut self, el: Element) -> Result<(), ReportError> {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(el),
            None if self.root.is_none() => self.root = Some(el),
            None => return Err(ReportError::Xml("Multiple root elements".into())),
        }
        Ok(())
    }

    fn started(&self) -> bool {
        !self.stack.is_empty() || self.root.is_some()
    }

    fn finish(self) -> Result<Element, ReportError> {
        if let Some(open) = self.stack.last() {
            return Err(ReportError::Xml(format!("Unclosed element <{}>", open.name)));
        }
        self.root.ok_or_else(|| ReportError::Xml("Empty document".into()))
    }
}

/// Parse a complete XML document into an element tree.
pub fn parse(xml: &str) -> Result<Element, ReportError> {
    let mut reader = Reader::from_str(xml);
    let mut builder = TreeBuilder::default();
    loop {
        match reader.read_event()? {
            Event::Eof => break,
            event => {
                builder.feed(event)?;
            }
        }
    }
    builder.finish()
}

/// Read one document from `source`, stopping as soon as its root element closes.
///
/// Bytes after the root element are left unread. `Ok(None)` means the stream
/// ended before any element started; ending mid-document is a connection error.
pub async fn read_element<R>(source: R, max_bytes: u64) -> Result<Option<Element>, ReportError>
where
    R: AsyncBufRead + Unpin,
{
    let mut reader = Reader::from_reader(source);
    let mut builder = TreeBuilder::default();
    let mut buf = Vec::new();

    loop {
        let event = reader.read_event_into_async(&mut buf).await.map_err(|e| match e {
            quick_xml::Error::Io(io) => ReportError::Connection(format!("GMP stream error: {}", io)),
            other => ReportError::from(other),
        })?;
        if let Event::Eof = event {
            if builder.started() {
                return Err(ReportError::Connection(
                    "Connection closed before the response was complete".into(),
                ));
            }
            return Ok(None);
        }
        let complete = builder.feed(event)?;
        if reader.buffer_position() > max_bytes {
            return Err(ReportError::Xml(format!("Response exceeds {} bytes", max_bytes)));
        }
        if complete {
            return builder.finish().map(Some);
        }
        buf.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_elements() {
        let doc = parse(
            r#"<get_assets_response status="200" status_text="OK">
                 <asset id="a1"><name>10.0.0.1</name></asset>
                 <asset id="a2"><name>10.0.0.2</name></asset>
               </get_assets_response>"#,
        )
        .unwrap();
        assert_eq!(doc.name, "get_assets_response");
        assert_eq!(doc.attr("status"), Some("200"));
        let names: Vec<&str> = doc.children("asset").filter_map(|a| a.child_text("name")).collect();
        assert_eq!(names, vec!["10.0.0.1", "10.0.0.2"]);
    }

    #[test]
    fn test_parse_unescapes_text_and_attributes() {
        let doc = parse(r#"<vuln note="a &amp; b"><name>Foo &lt;= 1.2</name></vuln>"#).unwrap();
        assert_eq!(doc.attr("note"), Some("a & b"));
        assert_eq!(doc.child_text("name"), Some("Foo <= 1.2"));
    }

    #[test]
    fn test_find_path_and_empty_elements() {
        let doc = parse(r#"<asset><host><detail><source id="r1"/></detail></host></asset>"#).unwrap();
        let source = doc.find("host/detail/source").unwrap();
        assert_eq!(source.attr("id"), Some("r1"));
        assert!(doc.find("host/missing").is_none());
    }

    #[test]
    fn test_child_text_empty_is_none() {
        let doc = parse("<asset><name>  </name></asset>").unwrap();
        assert!(doc.child_text("name").is_none());
    }

    #[test]
    fn test_parse_rejects_unclosed() {
        assert!(parse("<a><b></b>").is_err());
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(parse("   ").is_err());
    }

    #[test]
    fn test_parse_rejects_multiple_roots() {
        assert!(parse("<a/><b/>").is_err());
    }

    #[tokio::test]
    async fn test_read_element_stops_at_root_close() {
        let mut source: &[u8] = b"<r status=\"200\"><a>x</a></r><next/>";
        let el = read_element(&mut source, 1024).await.unwrap().unwrap();
        assert_eq!(el.name, "r");
        assert_eq!(el.child_text("a"), Some("x"));
        assert_eq!(source, b"<next/>");
    }

    #[tokio::test]
    async fn test_read_element_empty_root() {
        let source: &[u8] = b"<r status=\"200\"/>";
        let el = read_element(source, 1024).await.unwrap().unwrap();
        assert_eq!(el.attr("status"), Some("200"));
    }

    #[tokio::test]
    async fn test_read_element_end_of_stream() {
        let empty: &[u8] = b"";
        assert!(read_element(empty, 1024).await.unwrap().is_none());

        let truncated: &[u8] = b"<r status=\"200\"><a>x</a>";
        let err = read_element(truncated, 1024).await.unwrap_err();
        assert!(matches!(err, ReportError::Connection(_)));
    }

    #[tokio::test]
    async fn test_read_element_size_limit() {
        let doc = format!("<r>{}</r>", "<a>x</a>".repeat(100));
        let err = read_element(doc.as_bytes(), 64).await.unwrap_err();
        assert!(matches!(err, ReportError::Xml(ref m) if m.contains("exceeds 64 bytes")));
        assert!(read_element(doc.as_bytes(), 4096).await.unwrap().is_some());
    }
}
