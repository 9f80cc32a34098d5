//! Loads the snippet library and bundles its modules into a single source text.

use crate::error::{Error, Result};
use quote::ToTokens;
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{self, Path, PathBuf};
use syn::punctuated::Punctuated;

/// Finds project root directory from the current directory.
pub fn project_root_path() -> Option<PathBuf> {
    env::current_dir().ok().and_then(|mut cwd| loop {
        trace!("Search project from {}", cwd.display());
        cwd.push("Cargo.toml");
        if fs::metadata(cwd.as_path())
            .map(|meta| meta.is_file())
            .unwrap_or(false)
        {
            cwd.pop();
            return Some(cwd);
        }

        cwd.pop();
        if !cwd.pop() {
            return None;
        }
    })
}

pub type ModPathBuf = Vec<String>;

struct Source {
    /// Kept items as source text, in file order.
    items: Vec<String>,
    /// `use` items importing from other crates. Kept in the output.
    externs: Vec<String>,
    /// In-crate `use` paths, resolved from the crate root.
    uses: Vec<ModPathBuf>,
}

pub struct Entry {
    pub mod_name: String,
    pub mod_path: ModPathBuf,
    pub file_path: PathBuf,
    /// First line of the module's inner doc comment.
    pub doc: Option<String>,
    source: Source,
}

impl Entry {
    pub fn qualified_name(&self) -> String {
        if self.mod_path.is_empty() {
            "crate".to_owned()
        } else {
            self.mod_path.join("::")
        }
    }
}

/// Maps a path relative to the source directory to a mod name and mod path.
/// lib.rs, foo/mod.rs or foo.rs.
/// mod_path: qualifier to the mod ([] for crate root, [bar, foo] for bar/foo/mod.rs or bar/foo.rs).
fn mod_path_of(relative: &Path) -> Option<(String, ModPathBuf)> {
    let mut mod_path = ModPathBuf::new();
    let mut mod_name = String::new();

    for component in relative.components() {
        match component {
            path::Component::Prefix(_) | path::Component::RootDir | path::Component::CurDir => {}
            path::Component::ParentDir => {
                mod_path.pop();
            }
            path::Component::Normal(name) => {
                let name = name.to_str()?;
                if name == "mod.rs" {
                    mod_name = mod_path.last()?.to_owned();
                } else if let Some(stem) = name.strip_suffix(".rs") {
                    mod_name = stem.to_owned();
                    if !(mod_path.is_empty() && (stem == "lib" || stem == "main")) {
                        mod_path.push(mod_name.to_owned());
                    }
                } else {
                    mod_name = name.to_owned();
                    mod_path.push(mod_name.to_owned());
                }
            }
        }
    }

    Some((mod_name, mod_path))
}

/// Collects paths from root to leaf of an in-crate use tree.
/// Returns None if the use imports from another crate.
fn use_paths(item_use: &syn::ItemUse, mod_path: &ModPathBuf) -> Option<Vec<ModPathBuf>> {
    fn go(node: &syn::UseTree, buf: &mut ModPathBuf, paths: &mut Vec<ModPathBuf>) {
        match node {
            syn::UseTree::Path(path) => {
                buf.push(path.ident.to_string());
                go(&path.tree, buf, paths);
                buf.pop();
            }
            syn::UseTree::Name(name) => {
                if name.ident == "self" {
                    paths.push(buf.to_owned());
                } else {
                    buf.push(name.ident.to_string());
                    paths.push(buf.to_owned());
                    buf.pop();
                }
            }
            syn::UseTree::Rename(rename) => {
                // Ignore alias
                if rename.ident == "self" {
                    paths.push(buf.to_owned());
                } else {
                    buf.push(rename.ident.to_string());
                    paths.push(buf.to_owned());
                    buf.pop();
                }
            }
            syn::UseTree::Glob(_) => {
                // At '*' in foo::bar::*
                // buf = [foo, bar]
                // Assume all items defined in the mod are dependend on.
                paths.push(buf.to_owned());
            }
            syn::UseTree::Group(group) => {
                // At '{}' in foo::bar::{a, b, c::d}
                for node in group.items.iter() {
                    go(node, buf, paths);
                }
            }
        }
    }

    if item_use.leading_colon.is_some() {
        return None;
    }

    let (mut buf, mut tree) = match &item_use.tree {
        syn::UseTree::Path(path) if path.ident == "crate" => (ModPathBuf::new(), &*path.tree),
        syn::UseTree::Path(path) if path.ident == "self" => (mod_path.to_owned(), &*path.tree),
        syn::UseTree::Path(path) if path.ident == "super" => (mod_path.to_owned(), &item_use.tree),
        _ => return None,
    };
    while let syn::UseTree::Path(path) = tree {
        if path.ident != "super" {
            break;
        }
        buf.pop();
        tree = &path.tree;
    }

    let mut paths = Vec::new();
    go(tree, &mut buf, &mut paths);
    Some(paths)
}

fn item_attrs(item: &syn::Item) -> &[syn::Attribute] {
    match item {
        syn::Item::Const(item) => &item.attrs,
        syn::Item::Enum(item) => &item.attrs,
        syn::Item::Fn(item) => &item.attrs,
        syn::Item::Impl(item) => &item.attrs,
        syn::Item::Macro(item) => &item.attrs,
        syn::Item::Mod(item) => &item.attrs,
        syn::Item::Static(item) => &item.attrs,
        syn::Item::Struct(item) => &item.attrs,
        syn::Item::Trait(item) => &item.attrs,
        syn::Item::TraitAlias(item) => &item.attrs,
        syn::Item::Type(item) => &item.attrs,
        syn::Item::Union(item) => &item.attrs,
        syn::Item::Use(item) => &item.attrs,
        _ => &[],
    }
}

/// Whether a cfg predicate can only hold in test builds.
fn requires_test(meta: &syn::Meta) -> bool {
    match meta {
        syn::Meta::Path(path) => path.is_ident("test"),
        syn::Meta::List(list) if list.path.is_ident("all") => list
            .parse_args_with(Punctuated::<syn::Meta, syn::Token![,]>::parse_terminated)
            .map(|metas| metas.iter().any(requires_test))
            .unwrap_or(false),
        _ => false,
    }
}

fn is_cfg_test(attrs: &[syn::Attribute]) -> bool {
    attrs.iter().any(|attr| {
        attr.path().is_ident("cfg")
            && attr
                .parse_args::<syn::Meta>()
                .map(|meta| requires_test(&meta))
                .unwrap_or(false)
    })
}

fn module_doc(attrs: &[syn::Attribute]) -> Option<String> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .find_map(|attr| match &attr.meta {
            syn::Meta::NameValue(meta) => match &meta.value {
                syn::Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Str(doc),
                    ..
                }) => Some(doc.value().trim().to_owned()),
                _ => None,
            },
            _ => None,
        })
        .filter(|doc| !doc.is_empty())
}

/// Start and end (line, column) of the tokens of an item, attributes included.
fn span_range(item: &syn::Item) -> Option<((usize, usize), (usize, usize))> {
    let mut range: Option<((usize, usize), (usize, usize))> = None;
    for token in item.to_token_stream() {
        let span = token.span();
        let start = (span.start().line, span.start().column);
        let end = (span.end().line, span.end().column);
        // Synthesized tokens have no extent.
        if start == end {
            continue;
        }
        range = Some(match range {
            None => (start, end),
            Some((lo, hi)) => (lo.min(start), hi.max(end)),
        });
    }
    range
}

fn is_line_comment(line: &str) -> bool {
    let line = line.trim_start();
    line.starts_with("//") && !line.starts_with("//!")
}

/// A file's text indexed by line, for cutting items out of it.
struct SourceText<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> SourceText<'a> {
    fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
        SourceText { text, line_starts }
    }

    fn line(&self, index: usize) -> &'a str {
        let start = self.line_starts[index];
        let end = self
            .line_starts
            .get(index + 1)
            .map(|&next| next - 1)
            .unwrap_or(self.text.len());
        &self.text[start..end]
    }

    /// Byte offset of a 1-based line and a char column.
    fn offset(&self, (line, column): (usize, usize)) -> Option<usize> {
        let line_start = *self.line_starts.get(line.checked_sub(1)?)?;
        let rest = &self.text[line_start..];
        Some(
            rest.char_indices()
                .nth(column)
                .map(|(i, _)| line_start + i)
                .unwrap_or(self.text.len()),
        )
    }

    /// Source text of an item, starting no earlier than `floor`.
    /// An item opening its own line takes the `//` comment lines right above it.
    /// Returns the text and the offset just past the item.
    fn item_text(&self, item: &syn::Item, floor: usize) -> Option<(String, usize)> {
        let (start, end) = span_range(item)?;
        let (mut begin, end) = (self.offset(start)?, self.offset(end)?);

        let line = start.0 - 1;
        let line_start = self.line_starts[line];
        if line_start >= floor && self.text[line_start..begin].trim().is_empty() {
            let mut first = line;
            while first > 0
                && self.line_starts[first - 1] >= floor
                && is_line_comment(self.line(first - 1))
            {
                first -= 1;
            }
            begin = self.line_starts[first];
        }
        Some((self.text[begin.max(floor)..end].to_owned(), end))
    }
}

/// Loads a source file.
pub fn load_mod_file(mod_name: String, mod_path: ModPathBuf, file_path: PathBuf) -> Result<Entry> {
    trace!("load mod {:?}", mod_path);

    let content = fs::read_to_string(&file_path).map_err(|err| Error::io(&file_path, err))?;
    let syn_file = syn::parse_file(&content).map_err(|source| Error::Syntax {
        path: file_path.clone(),
        source,
    })?;
    let text = SourceText::new(&content);
    let mut floor = 0;

    let mut source = Source {
        items: Vec::new(),
        externs: Vec::new(),
        uses: Vec::new(),
    };

    for item in syn_file.items.iter() {
        match item {
            _ if is_cfg_test(item_attrs(item)) => {
                trace!("Ignore test item in {:?}", mod_path);
            }
            syn::Item::ExternCrate(item) => {
                trace!("Ignore {:?}", item);
            }
            syn::Item::ForeignMod(item) => {
                trace!("Ignore {:?}", item);
            }
            syn::Item::Mod(item) => {
                trace!("Ignore mod {}", item.ident);
            }
            syn::Item::Use(item_use) => match use_paths(item_use, &mod_path) {
                // Self-crate use statement. Stripped from the output.
                // Declares in-crate dependencies.
                Some(paths) => source.uses.extend(paths),
                None => {
                    if let Some((extern_text, end)) = text.item_text(item, floor) {
                        source.externs.push(extern_text);
                        floor = end;
                    }
                }
            },
            _ => match text.item_text(item, floor) {
                Some((item_text, end)) => {
                    source.items.push(item_text);
                    floor = end;
                }
                None => warn!(
                    "No source location for {} in {}",
                    item.to_token_stream(),
                    file_path.display()
                ),
            },
        }
    }

    Ok(Entry {
        mod_name,
        mod_path,
        doc: module_doc(&syn_file.attrs),
        file_path,
        source,
    })
}

fn starts_with(prefix: &ModPathBuf, path: &ModPathBuf) -> bool {
    prefix.len() <= path.len() && prefix.iter().zip(path.iter()).all(|(l, r)| l == r)
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub struct Library {
    src_path: PathBuf,
    entries: Vec<Entry>,
}

impl Library {
    /// Loads each `.rs` file under the source directory as an entry.
    pub fn load(src_path: &Path) -> Result<Library> {
        let is_dir = fs::metadata(src_path)
            .map(|meta| meta.is_dir())
            .unwrap_or(false);
        if !is_dir {
            return Err(Error::LibraryNotFound(src_path.to_owned()));
        }
        let src_path = src_path
            .canonicalize()
            .map_err(|err| Error::io(src_path, err))?;

        let pat = src_path.join("**").join("*.rs").display().to_string();
        trace!("collecting {}", pat);

        let mut entries = Vec::new();
        for file_path in glob::glob(&pat)? {
            let file_path = file_path.map_err(|err| {
                let path = err.path().to_owned();
                Error::io(path, err.into())
            })?;

            let relative = match file_path.strip_prefix(&src_path) {
                Ok(relative) => relative,
                Err(_) => continue,
            };
            let (mod_name, mod_path) = match mod_path_of(relative) {
                Some(found) => found,
                None => {
                    warn!("Not a module file: {}", file_path.display());
                    continue;
                }
            };
            if mod_path.is_empty() && mod_name == "main" {
                trace!("Skip binary root {}", file_path.display());
                continue;
            }

            entries.push(load_mod_file(mod_name, mod_path, file_path)?);
        }

        debug!("Loaded {} mods from {}", entries.len(), src_path.display());
        Ok(Library { src_path, entries })
    }

    pub fn src_path(&self) -> &Path {
        &self.src_path
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Looks up a mod by path (`graph::dijkstra`), then by name (`dijkstra`).
    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.qualified_name() == name)
            .or_else(|| self.entries.iter().position(|entry| entry.mod_name == name))
    }

    pub fn find(&self, name: &str) -> Option<&Entry> {
        self.position(name).map(|index| &self.entries[index])
    }

    /// Entries a use path depends on.
    fn resolve(&self, dep: &ModPathBuf) -> Vec<usize> {
        let mut dep = dep.to_owned();

        // Identifiers starting with uppercase aren't crate/mod.
        while dep
            .last()
            .and_then(|name| name.chars().next())
            .map(|c| c.is_uppercase())
            .unwrap_or(false)
        {
            dep.pop();
        }

        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| {
                if dep.is_empty() || entry.mod_path.is_empty() {
                    dep.is_empty() && entry.mod_path.is_empty()
                } else {
                    starts_with(&entry.mod_path, &dep) || starts_with(&dep, &entry.mod_path)
                }
            })
            .map(|(index, _)| index)
            .collect()
    }

    /// Names of mods the entry directly depends on.
    pub fn dependencies(&self, entry: &Entry) -> Vec<String> {
        let mut names = BTreeSet::new();
        for dep in entry.source.uses.iter() {
            for index in self.resolve(dep) {
                let dep_entry = &self.entries[index];
                if dep_entry.mod_path != entry.mod_path {
                    names.insert(dep_entry.qualified_name());
                }
            }
        }
        names.into_iter().collect()
    }

    fn visit(&self, index: usize, done: &mut BTreeSet<usize>, order: &mut Vec<usize>) {
        if !done.insert(index) {
            return;
        }

        let entry = &self.entries[index];
        for dep in entry.source.uses.iter() {
            for dep_index in self.resolve(dep) {
                trace!(
                    "{:?} depends on {:?}",
                    entry.mod_path,
                    self.entries[dep_index].mod_path
                );
                self.visit(dep_index, done, order);
            }
        }
        order.push(index);
    }

    /// Flattens the named mods and everything they depend on into one source text.
    /// Dependencies come before their dependents and each mod appears once.
    pub fn bundle<S: AsRef<str>>(&self, names: &[S]) -> Result<String> {
        let mut done = BTreeSet::new();
        let mut order = Vec::new();
        for name in names {
            let name = name.as_ref();
            let index = self
                .position(name)
                .ok_or_else(|| Error::UnknownModule(name.to_owned()))?;
            self.visit(index, &mut done, &mut order);
        }
        info!(
            "Bundle {:?}",
            order
                .iter()
                .map(|&index| self.entries[index].qualified_name())
                .collect::<Vec<_>>()
        );

        // Two mods importing the same thing from std would collide.
        let mut seen = BTreeSet::new();
        let mut externs = Vec::new();
        for &index in order.iter() {
            for text in self.entries[index].source.externs.iter() {
                if seen.insert(normalize_whitespace(text)) {
                    externs.push(text.as_str());
                }
            }
        }

        let mut sections = Vec::new();
        if !externs.is_empty() {
            sections.push(externs.join("\n"));
        }
        for &index in order.iter() {
            let entry = &self.entries[index];
            if entry.source.items.is_empty() {
                continue;
            }
            sections.push(format!(
                "// {}\n{}",
                entry.qualified_name(),
                entry.source.items.join("\n\n")
            ));
        }
        Ok(sections.join("\n\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TempDir;

    fn library() -> Library {
        let src_path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("template-lib")
            .join("src");
        Library::load(&src_path).unwrap()
    }

    fn write_library(name: &str, files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new(name);
        for (path, content) in files {
            dir.write(path, content);
        }
        dir
    }

    fn mods(names: &[&str]) -> ModPathBuf {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn test_mod_path_of() {
        assert_eq!(mod_path_of(Path::new("lib.rs")), Some(("lib".to_owned(), mods(&[]))));
        assert_eq!(mod_path_of(Path::new("bit.rs")), Some(("bit".to_owned(), mods(&["bit"]))));
        assert_eq!(
            mod_path_of(Path::new("graph/mod.rs")),
            Some(("graph".to_owned(), mods(&["graph"])))
        );
        assert_eq!(
            mod_path_of(Path::new("graph/dijkstra.rs")),
            Some(("dijkstra".to_owned(), mods(&["graph", "dijkstra"])))
        );
        assert_eq!(mod_path_of(Path::new("mod.rs")), None);
    }

    #[test]
    fn test_use_paths() {
        let paths = |code: &str, mod_path: &[&str]| {
            let item_use = syn::parse_str::<syn::ItemUse>(code).unwrap();
            use_paths(&item_use, &mods(mod_path))
        };

        assert_eq!(
            paths("use crate::monoid::Monoid;", &["bit"]),
            Some(vec![mods(&["monoid", "Monoid"])])
        );
        assert_eq!(
            paths("use crate::num::{self, gcd as g};", &["bit"]),
            Some(vec![mods(&["num"]), mods(&["num", "gcd"])])
        );
        assert_eq!(
            paths("use super::{a::X, b};", &["graph", "dijkstra"]),
            Some(vec![mods(&["graph", "a", "X"]), mods(&["graph", "b"])])
        );
        assert_eq!(
            paths("use super::super::c;", &["x", "y", "z"]),
            Some(vec![mods(&["x", "c"])])
        );
        assert_eq!(
            paths("use self::inner::*;", &["graph"]),
            Some(vec![mods(&["graph", "inner"])])
        );
        assert_eq!(paths("use std::io::Write;", &["bit"]), None);
        assert_eq!(paths("use ::core::mem;", &["bit"]), None);
    }

    #[test]
    fn test_load_template_lib() {
        let library = library();
        for name in &["bit", "monoid", "segment_tree", "union_find", "combination", "scanner"] {
            assert!(library.find(name).is_some(), "{} not loaded", name);
        }
        assert_eq!(
            library.find("scanner").unwrap().doc.as_deref(),
            Some("Whitespace separated token reader.")
        );
        assert_eq!(library.find("bit").unwrap().doc, None);
    }

    #[test]
    fn test_dependencies() {
        let library = library();
        let deps = |name: &str| library.dependencies(library.find(name).unwrap());
        assert_eq!(deps("combination"), vec!["prelude".to_owned()]);
        assert_eq!(deps("bit"), vec!["monoid".to_owned()]);
        assert!(deps("union_find").is_empty());
    }

    #[test]
    fn test_bundle_orders_dependencies_first() {
        let code = library().bundle(&["bit"]).unwrap();

        let monoid = code.find("pub trait Monoid").unwrap();
        let bit = code.find("pub struct BIT").unwrap();
        assert!(monoid < bit);
        assert!(code.contains("// monoid\n"));
        assert!(code.contains("/// Binary indexed tree"));
        assert!(code.contains("fn rightmost_bit"));
        assert!(code.contains("macro_rules! impl_sum_monoid"));
    }

    #[test]
    fn test_bundle_strips_tests_and_crate_uses() {
        let code = library()
            .bundle(&["bit", "segment_tree", "combination", "union_find"])
            .unwrap();

        assert!(!code.contains("use crate::"));
        assert!(!code.contains("#[cfg(test)]"));
        assert!(!code.contains("mod tests"));
        assert!(!code.contains("//!"));
    }

    #[test]
    fn test_bundle_includes_each_mod_once() {
        let code = library()
            .bundle(&["bit", "segment_tree", "monoid", "bit"])
            .unwrap();
        assert_eq!(code.matches("pub trait Monoid").count(), 1);
        assert_eq!(code.matches("// monoid\n").count(), 1);
    }

    #[test]
    fn test_bundle_unknown() {
        match library().bundle(&["splay_tree"]) {
            Err(Error::UnknownModule(name)) => assert_eq!(name, "splay_tree"),
            other => panic!("unexpected {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_bundle_nested_mods() {
        let dir = write_library(
            "nested",
            &[
                ("main.rs", "fn main() {}\n"),
                ("lib.rs", "pub mod graph;\npub mod util;\n"),
                (
                    "util.rs",
                    "use std::cmp::Reverse;\n\n// Shared helper.\npub fn twice(x: i64) -> i64 {\n    x * 2\n}\n",
                ),
                ("graph/mod.rs", "pub mod dijkstra;\n"),
                (
                    "graph/dijkstra.rs",
                    "use std::cmp::Reverse;\nuse crate::util::twice;\n\npub fn run() -> i64 {\n    twice(Reverse(1).0)\n}\n\n#[cfg(test)]\nfn helper() {}\n",
                ),
            ],
        );
        let library = Library::load(dir.path()).unwrap();

        assert!(library.find("main").is_none());
        assert_eq!(library.find("lib").unwrap().qualified_name(), "crate");

        let code = library.bundle(&["graph::dijkstra"]).unwrap();
        assert_eq!(
            code,
            "use std::cmp::Reverse;\n\n\
             // util\n// Shared helper.\npub fn twice(x: i64) -> i64 {\n    x * 2\n}\n\n\
             // graph::dijkstra\npub fn run() -> i64 {\n    twice(Reverse(1).0)\n}"
        );
        assert_eq!(library.bundle(&["dijkstra"]).unwrap(), code);
    }

    #[test]
    fn test_bundle_items_sharing_a_line() {
        let dir = write_library(
            "pair",
            &[
                ("pair.rs", "pub struct A; pub struct B;\n"),
                (
                    "mixed.rs",
                    "use std::fmt; use crate::pair::A; pub struct C(A); // tail\n// Above D.\npub struct D;\n",
                ),
            ],
        );
        let library = Library::load(dir.path()).unwrap();

        assert_eq!(
            library.bundle(&["pair"]).unwrap(),
            "// pair\npub struct A;\n\npub struct B;"
        );
        assert_eq!(
            library.bundle(&["mixed"]).unwrap(),
            "use std::fmt;\n\n\
             // pair\npub struct A;\n\npub struct B;\n\n\
             // mixed\npub struct C(A);\n\n// Above D.\npub struct D;"
        );
    }

    #[test]
    fn test_bundle_drops_test_only_cfg() {
        let dir = write_library(
            "cfg",
            &[(
                "util.rs",
                "#[cfg(all(test, feature = \"slow\"))]\nfn only_in_tests() {}\n\n\
                 #[cfg(not(test))]\nfn outside_tests() {}\n\n\
                 #[cfg(any(test, unix))]\nfn sometimes() {}\n",
            )],
        );
        let code = Library::load(dir.path()).unwrap().bundle(&["util"]).unwrap();

        assert!(!code.contains("only_in_tests"));
        assert!(code.contains("#[cfg(not(test))]\nfn outside_tests() {}"));
        assert!(code.contains("fn sometimes() {}"));
    }

    #[test]
    fn test_library_not_found() {
        let missing = env::temp_dir().join("cftemplate-no-such-dir");
        match Library::load(&missing) {
            Err(Error::LibraryNotFound(path)) => assert_eq!(path, missing),
            _ => panic!("expected LibraryNotFound"),
        }
    }
}
