//! Streaming parser for EFetch `PubmedArticleSet` documents.
//!
//! Only the fields the affiliation filter needs are read:
//!
//! | Field        | Path inside `PubmedArticle`                  |
//! |--------------|----------------------------------------------|
//! | identifier   | first `PMID`                                 |
//! | title        | first `ArticleTitle`                         |
//! | date         | first `PubDate`, then its `Year/Month/Day`   |
//! | authors      | every `AuthorList/Author`                    |
//! | author name  | first `ForeName` + first `LastName`          |
//! | affiliation  | first `AffiliationInfo/Affiliation`          |
//!
//! A record is emitted when its `</PubmedArticle>` is read, so a document that
//! breaks halfway still yields every article closed before the break.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::{DocumentError, PartialParse};
use crate::models::{AuthorInfo, PaperRecord};

/// Parse an EFetch XML document into paper records.
///
/// # Errors
///
/// Returns [`PartialParse`] when the document is malformed or truncated; it
/// carries the records completed before the problem.
pub fn parse_article_set(xml: &str) -> Result<Vec<PaperRecord>, PartialParse> {
    let mut reader = Reader::from_str(xml);
    let mut set = ArticleSet::default();

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(source) => return Err(set.fail(xml_error(&reader, source))),
        };

        match event {
            Event::Start(e) => set.start(e.name().as_ref()),
            Event::Empty(e) => {
                set.start(e.name().as_ref());
                set.end();
            }
            Event::End(_) => set.end(),
            Event::Text(e) if set.is_capturing() => match e.unescape() {
                Ok(text) => set.text(&text),
                Err(source) => return Err(set.fail(xml_error(&reader, source))),
            },
            Event::CData(e) if set.is_capturing() => set.text(&String::from_utf8_lossy(&e)),
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(element) = set.open_element() {
        return Err(set.fail(DocumentError::Truncated { element }));
    }

    Ok(set.records)
}

fn xml_error(reader: &Reader<&[u8]>, source: quick_xml::Error) -> DocumentError {
    DocumentError::Xml { position: reader.buffer_position(), source }
}

/// Records parsed so far plus the article currently open.
#[derive(Default)]
struct ArticleSet {
    records: Vec<PaperRecord>,
    article: Option<ArticleState>,
}

impl ArticleSet {
    fn start(&mut self, name: &[u8]) {
        match &mut self.article {
            Some(article) => article.start(name),
            None if name == b"PubmedArticle" => self.article = Some(ArticleState::open()),
            None => {}
        }
    }

    fn end(&mut self) {
        let Some(article) = &mut self.article else { return };
        if article.end() {
            if let Some(done) = self.article.take() {
                self.records.push(done.finish());
            }
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(capture) = self.article.as_mut().and_then(|a| a.capture.as_mut()) {
            capture.text.push_str(text);
        }
    }

    fn is_capturing(&self) -> bool {
        self.article.as_ref().is_some_and(|a| a.capture.is_some())
    }

    fn open_element(&self) -> Option<String> {
        let name = self.article.as_ref()?.path.last()?;
        Some(String::from_utf8_lossy(name).into_owned())
    }

    fn fail(self, source: DocumentError) -> PartialParse {
        PartialParse { recovered: self.records, source }
    }
}

#[derive(Debug, Clone, Copy)]
enum Field {
    PubmedId,
    Title,
    Year,
    Month,
    Day,
    ForeName,
    LastName,
    Affiliation,
}

/// Text being collected for one element, ending when `depth` closes.
struct Capture {
    field: Field,
    depth: usize,
    text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateScope {
    NotSeen,
    Open(usize),
    Done,
}

struct AuthorState {
    depth: usize,
    fore_name: Option<String>,
    last_name: Option<String>,
    affiliation: Option<String>,
}

impl AuthorState {
    fn finish(self) -> AuthorInfo {
        AuthorInfo::new(self.fore_name.as_deref(), self.last_name.as_deref(), self.affiliation)
    }
}

/// One `PubmedArticle` being read.
struct ArticleState {
    /// Open element names, `PubmedArticle` first.
    path: Vec<Vec<u8>>,
    capture: Option<Capture>,
    pubmed_id: Option<String>,
    title: Option<String>,
    date_scope: DateScope,
    /// Year, month, day.
    date: [Option<String>; 3],
    author: Option<AuthorState>,
    authors: Vec<AuthorInfo>,
}

impl ArticleState {
    fn open() -> Self {
        Self {
            path: vec![b"PubmedArticle".to_vec()],
            capture: None,
            pubmed_id: None,
            title: None,
            date_scope: DateScope::NotSeen,
            date: [None, None, None],
            author: None,
            authors: Vec::new(),
        }
    }

    fn start(&mut self, name: &[u8]) {
        let parent = self.path.last().map(Vec::as_slice);
        let under_author_list = parent == Some(b"AuthorList".as_slice());
        let under_affiliation_info = parent == Some(b"AffiliationInfo".as_slice());

        self.path.push(name.to_vec());
        let depth = self.path.len();

        // Inline markup inside a captured element only contributes text.
        if self.capture.is_some() {
            return;
        }

        let field = match name {
            b"PMID" if self.pubmed_id.is_none() => Some(Field::PubmedId),
            b"ArticleTitle" if self.title.is_none() => Some(Field::Title),
            b"PubDate" if self.date_scope == DateScope::NotSeen => {
                self.date_scope = DateScope::Open(depth);
                None
            }
            b"Year" | b"Month" | b"Day" if matches!(self.date_scope, DateScope::Open(_)) => {
                let (index, field) = match name {
                    b"Year" => (0, Field::Year),
                    b"Month" => (1, Field::Month),
                    _ => (2, Field::Day),
                };
                self.date[index].is_none().then_some(field)
            }
            b"Author" if under_author_list && self.author.is_none() => {
                self.author = Some(AuthorState {
                    depth,
                    fore_name: None,
                    last_name: None,
                    affiliation: None,
                });
                None
            }
            b"ForeName" if self.author.as_ref().is_some_and(|a| a.fore_name.is_none()) => {
                Some(Field::ForeName)
            }
            b"LastName" if self.author.as_ref().is_some_and(|a| a.last_name.is_none()) => {
                Some(Field::LastName)
            }
            b"Affiliation"
                if under_affiliation_info
                    && self.author.as_ref().is_some_and(|a| a.affiliation.is_none()) =>
            {
                Some(Field::Affiliation)
            }
            _ => None,
        };

        if let Some(field) = field {
            self.capture = Some(Capture { field, depth, text: String::new() });
        }
    }

    /// Close the innermost element. Returns true once `PubmedArticle` itself closes.
    fn end(&mut self) -> bool {
        let depth = self.path.len();

        if let Some(capture) = self.capture.take_if(|c| c.depth == depth) {
            self.store(capture);
        }
        if self.date_scope == DateScope::Open(depth) {
            self.date_scope = DateScope::Done;
        }
        if let Some(author) = self.author.take_if(|a| a.depth == depth) {
            self.authors.push(author.finish());
        }

        self.path.pop();
        self.path.is_empty()
    }

    fn store(&mut self, capture: Capture) {
        let text = Some(capture.text);
        match capture.field {
            Field::PubmedId => self.pubmed_id = text,
            Field::Title => self.title = text,
            Field::Year => self.date[0] = text,
            Field::Month => self.date[1] = text,
            Field::Day => self.date[2] = text,
            Field::ForeName | Field::LastName | Field::Affiliation => {
                let Some(author) = self.author.as_mut() else { return };
                match capture.field {
                    Field::ForeName => author.fore_name = text,
                    Field::LastName => author.last_name = text,
                    _ => author.affiliation = text,
                }
            }
        }
    }

    fn finish(self) -> PaperRecord {
        PaperRecord::new(self.pubmed_id, self.title, &self.date, self.authors)
    }
}
