// WHY: One RMH corpus document, parsed on first use; scalar lookups are cached,
// body traversals are fresh iterators on every call

use std::cell::OnceCell;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

use crate::error::RmhError;
use crate::sentence::Sentence;
use crate::tree::{Element, NodeId, XmlTree};

/// TEI P5 namespace used by every element the accessor looks up
pub const TEI_NS: &str = "http://www.tei-c.org/ns/1.0";

/// File names derived from a document identifier: `<id>.tsv` and `<id>.desc.xml`
pub fn derived_file_names(identifier: &str) -> (PathBuf, PathBuf) {
    (
        PathBuf::from(format!("{identifier}.tsv")),
        PathBuf::from(format!("{identifier}.desc.xml")),
    )
}

/// Read-only accessor for a TEI-XML document of the RMH corpus
///
/// Constructing from a path does no I/O. The file is read and parsed the first
/// time anything derived from it is requested, and the tree is kept for the
/// lifetime of the accessor. A failed load is returned to the caller and retried
/// on the next access.
///
/// ```no_run
/// use rmhfile::RmhFile;
///
/// let file = RmhFile::new("IGC-News1-0001.xml");
/// for pair in file.indexed_sentence_text()? {
///     let (index, text) = pair;
///     println!("{index}\t{text}");
/// }
/// # Ok::<(), rmhfile::RmhError>(())
/// ```
pub struct RmhFile {
    path: PathBuf,
    tsv_fname: Option<PathBuf>,
    desc_fname: Option<PathBuf>,
    tree: OnceCell<XmlTree>,
    header: OnceCell<Option<NodeId>>,
    identifier: OnceCell<Option<String>>,
    source_desc: OnceCell<Option<NodeId>>,
}

impl RmhFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_tree(path.into(), OnceCell::new())
    }

    fn with_tree(path: PathBuf, tree: OnceCell<XmlTree>) -> Self {
        Self {
            path,
            tsv_fname: None,
            desc_fname: None,
            tree,
            header: OnceCell::new(),
            identifier: OnceCell::new(),
            source_desc: OnceCell::new(),
        }
    }

    /// Path of the source document, or the bare identifier for text-built files
    pub fn as_path(&self) -> &Path {
        &self.path
    }

    /// `<identifier>.tsv`, set only when built from XML text
    pub fn tsv_fname(&self) -> Option<&Path> {
        self.tsv_fname.as_deref()
    }

    /// `<identifier>.desc.xml`, set only when built from XML text
    pub fn desc_fname(&self) -> Option<&Path> {
        self.desc_fname.as_deref()
    }

    /// True once the document has been parsed
    pub fn is_loaded(&self) -> bool {
        self.tree.get().is_some()
    }

    fn tree(&self) -> Result<&XmlTree, RmhError> {
        if let Some(tree) = self.tree.get() {
            return Ok(tree);
        }
        let content = fs::read_to_string(&self.path).map_err(|source| RmhError::Io {
            path: self.path.clone(),
            source,
        })?;
        let tree = XmlTree::parse(&content)?;
        debug!(path = %self.path.display(), nodes = tree.node_count(), "Parsed RMH document");
        Ok(self.tree.get_or_init(|| tree))
    }

    /// Root element (`TEI`), loading the document on first use
    pub fn root(&self) -> Result<Element<'_>, RmhError> {
        Ok(self.tree()?.root())
    }

    /// The `teiHeader` child of the root, if any
    pub fn header(&self) -> Result<Option<Element<'_>>, RmhError> {
        let tree = self.tree()?;
        let header = self
            .header
            .get_or_init(|| tree.root().find(TEI_NS, "teiHeader").map(Element::id));
        Ok(header.map(|id| tree.element(id)))
    }

    /// Text of the first `idno` element in document order
    pub fn identifier(&self) -> Result<Option<&str>, RmhError> {
        let tree = self.tree()?;
        let identifier = self.identifier.get_or_init(|| {
            tree.root()
                .iter()
                .find(|element| element.is(TEI_NS, "idno"))
                .and_then(Element::text)
                .map(str::to_string)
        });
        Ok(identifier.as_deref())
    }

    /// The `sourceDesc` child of the header; absent when the header is
    pub fn source_desc(&self) -> Result<Option<Element<'_>>, RmhError> {
        let tree = self.tree()?;
        let header = self.header()?;
        let source_desc = self
            .source_desc
            .get_or_init(|| header.and_then(|h| h.find(TEI_NS, "sourceDesc")).map(Element::id));
        Ok(source_desc.map(|id| tree.element(id)))
    }

    /// `p` elements directly under any `div1`, in document order
    pub fn paragraphs(&self) -> Result<impl Iterator<Item = Element<'_>> + '_, RmhError> {
        let root = self.root()?;
        Ok(root
            .descendants()
            .filter(|element| element.is(TEI_NS, "div1"))
            .flat_map(|div| div.children_named(TEI_NS, "p")))
    }

    /// Every `s` element of every paragraph as a [`Sentence`]
    pub fn sentences(&self) -> Result<impl Iterator<Item = Sentence> + '_, RmhError> {
        let identifier = self.identifier()?;
        Ok(self.paragraphs()?.flat_map(move |paragraph| {
            let number = paragraph.attr("n");
            paragraph
                .children_named(TEI_NS, "s")
                .map(move |sentence| Sentence::from_element(identifier, number, sentence))
        }))
    }

    /// `(index, text)` per sentence, text being the token texts joined by spaces
    pub fn indexed_sentence_text(&self) -> Result<impl Iterator<Item = (String, String)> + '_, RmhError> {
        Ok(self.sentences()?.map(|sentence| {
            let text = sentence.text();
            (sentence.index, text)
        }))
    }

    /// True if both `<id>.tsv` and `<id>.desc.xml` are regular files in `directory`
    ///
    /// A document without an identifier is never on disk.
    pub fn is_on_disk(&self, directory: impl AsRef<Path>) -> Result<bool, RmhError> {
        let Some(identifier) = self.identifier()? else {
            return Ok(false);
        };
        let directory = directory.as_ref();
        let (tsv, desc) = derived_file_names(identifier);
        Ok(directory.join(tsv).is_file() && directory.join(desc).is_file())
    }

    /// Export to `<id>.tsv` (and optionally `<id>.desc.xml`)
    ///
    /// The export format has not been settled; this always fails.
    pub fn write_to_disk(&self, _directory: impl AsRef<Path>, _write_description: bool) -> Result<(), RmhError> {
        Err(RmhError::NotImplemented("writing RMH files to disk"))
    }
}

impl FromStr for RmhFile {
    type Err = RmhError;

    /// Parse XML text immediately; the identifier becomes the logical path
    fn from_str(data: &str) -> Result<Self, Self::Err> {
        let tree = XmlTree::parse(data)?;
        let mut file = Self::with_tree(PathBuf::new(), OnceCell::from(tree));
        let identifier = file
            .identifier()?
            .ok_or(RmhError::MissingIdentifier)?
            .to_string();
        let (tsv, desc) = derived_file_names(&identifier);
        file.path = PathBuf::from(identifier);
        file.tsv_fname = Some(tsv);
        file.desc_fname = Some(desc);
        Ok(file)
    }
}

impl AsRef<Path> for RmhFile {
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}

impl fmt::Debug for RmhFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RmhFile")
            .field("path", &self.path)
            .field("loaded", &self.is_loaded())
            .finish_non_exhaustive()
    }
}
