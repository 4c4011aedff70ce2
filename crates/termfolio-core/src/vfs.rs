use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::error::FsError;
use crate::path;
use crate::profile::Profile;
use crate::profile::Roster;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Directory { children: BTreeSet<String> },
    File { content: String },
}

impl Node {
    pub fn is_dir(&self) -> bool {
        matches!(self, Self::Directory { .. })
    }
}

#[derive(Debug, Clone)]
pub struct VirtualFilesystem {
    nodes: BTreeMap<String, Node>,
}

const README: &str = "\
CodeCraft: three students, one shared terminal.

Tip: try `help`, `whoami`, `ls`, `cd`, `cat`, `neofetch`, `weather kathmandu`, `open team`.
";

const MANIFESTO: &str = "\
We build small things carefully.
Fewer features, sharper edges.

Every project ships with:
- a clear structure
- fast feedback
- notes for whoever comes next
";

const TERMINAL_PORTFOLIO: &str = "\
# Terminal Portfolio
A pretend shell that introduces the team one command at a time.

Pieces:
- a tiny command parser
- a read-only virtual filesystem
- live weather lookups
- two games for the bored
";

const UI_SYSTEMS: &str = "\
# UI Systems
A shared component kit: muted palette, generous spacing, no surprises.
";

const QUALITY_NOTES: &str = "\
# Quality Notes
We test the boring paths first, then the weird ones.
";

const PRIZE: &str = "You found the vault. The prize is knowing where to look.\n";

impl VirtualFilesystem {
    /// Builds the fixed tree plus one home directory per profile.
    pub fn build(roster: &Roster) -> Self {
        let mut fs = Self {
            nodes: BTreeMap::new(),
        };
        fs.nodes.insert(
            path::ROOT.to_string(),
            Node::Directory {
                children: BTreeSet::new(),
            },
        );

        fs.add_file("/README.txt", README.to_string());
        fs.add_file("/team/manifesto.txt", MANIFESTO.to_string());
        fs.add_file("/team/members.txt", members_listing(roster));
        fs.add_file("/projects/terminal-portfolio.md", TERMINAL_PORTFOLIO.to_string());
        fs.add_file("/projects/ui-systems.md", UI_SYSTEMS.to_string());
        fs.add_file("/projects/quality-notes.md", QUALITY_NOTES.to_string());
        fs.add_file("/.vault/prize.txt", PRIZE.to_string());

        fs.add_dir("/home");
        for profile in roster.iter() {
            let home = profile.home();
            fs.add_file(&path::join(&home, "about.txt"), about_file(profile));
            fs.add_file(&path::join(&home, "skills.txt"), skills_file(profile));
            fs.add_file(&path::join(&home, "links.txt"), links_file(profile));
        }
        fs
    }

    pub fn lookup(&self, path: &str) -> Result<&Node, FsError> {
        self.nodes
            .get(path)
            .ok_or_else(|| FsError::NotFound(path.to_string()))
    }

    pub fn exists(&self, path: &str) -> bool {
        self.nodes.contains_key(path)
    }

    pub fn is_dir(&self, path: &str) -> bool {
        self.nodes.get(path).is_some_and(Node::is_dir)
    }

    /// Child names of a directory in lexicographic order.
    pub fn list(&self, path: &str) -> Result<Vec<&str>, FsError> {
        match self.lookup(path)? {
            Node::Directory { children } => Ok(children.iter().map(String::as_str).collect()),
            Node::File { .. } => Err(FsError::NotADirectory(path.to_string())),
        }
    }

    pub fn read(&self, path: &str) -> Result<&str, FsError> {
        match self.lookup(path)? {
            Node::File { content } => Ok(content.as_str()),
            Node::Directory { .. } => Err(FsError::IsADirectory(path.to_string())),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // Build-time only. Creates missing ancestors as directories.
    fn add_dir(&mut self, dir: &str) {
        if self.nodes.contains_key(dir) {
            return;
        }
        let parent = path::parent(dir).to_string();
        self.add_dir(&parent);
        self.link_child(&parent, path::file_name(dir));
        self.nodes.insert(
            dir.to_string(),
            Node::Directory {
                children: BTreeSet::new(),
            },
        );
    }

    fn add_file(&mut self, file: &str, content: String) {
        let parent = path::parent(file).to_string();
        self.add_dir(&parent);
        self.link_child(&parent, path::file_name(file));
        self.nodes.insert(file.to_string(), Node::File { content });
    }

    fn link_child(&mut self, parent: &str, name: &str) {
        if let Some(Node::Directory { children }) = self.nodes.get_mut(parent) {
            children.insert(name.to_string());
        }
    }
}

fn members_listing(roster: &Roster) -> String {
    let mut out = String::new();
    for profile in roster.iter() {
        out.push_str(&format!("- {} ({})\n", profile.name, profile.role));
    }
    out
}

fn about_file(profile: &Profile) -> String {
    let mut out = format!("{}\n{}\n\n{}\n", profile.name, profile.role, profile.vibe);
    if profile.city.is_some() || profile.country.is_some() || profile.fun.is_some() {
        out.push('\n');
    }
    if let Some(location) = profile.location() {
        out.push_str(&format!("Location: {location}\n"));
    }
    if let Some(fun) = &profile.fun {
        out.push_str(&format!("Fun fact: {fun}\n"));
    }
    out
}

fn skills_file(profile: &Profile) -> String {
    let mut out = String::new();
    for skill in &profile.skills {
        out.push_str(&format!("• {skill}\n"));
    }
    out
}

fn links_file(profile: &Profile) -> String {
    let mut out = String::new();
    for link in &profile.links {
        out.push_str(&format!("{}: {}\n", link.label, link.target));
    }
    out
}
