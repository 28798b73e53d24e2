use std::fmt::Write as _;

use crate::token::Span;

/// Variant tag carried by every node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Program,
    Comment,
    Word,
}

/// Capability set shared by every node.
pub trait Node {
    /// Variant tag, for dispatch without downcasting.
    fn kind(&self) -> NodeKind;

    /// Human-readable label.
    fn label(&self) -> String;

    /// Hand this node to the matching `visit_*` method.
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V);
}

/// Complete parsed document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    /// Top-level declarations in document order.
    pub declarations: Vec<Declaration>,
}

/// Anything that may appear at the top level of a [`Program`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Comment(Comment),
}

/// `/* word word ... */`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub words: Vec<Word>,
    /// Position of the opening `/`.
    pub span: Span,
}

/// Identifier or keyword captured verbatim inside a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub text: String,
    pub span: Span,
}

impl Program {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            declarations: Vec::new(),
        }
    }

    /// Comments in document order.
    pub fn comments(&self) -> impl Iterator<Item = &Comment> {
        self.declarations.iter().map(|decl| match decl {
            Declaration::Comment(comment) => comment,
        })
    }
}

impl Comment {
    /// Word texts in lexical order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(|w| w.text.as_str())
    }
}

impl Word {
    #[must_use]
    pub fn new(text: impl Into<String>, span: Span) -> Self {
        Self {
            text: text.into(),
            span,
        }
    }
}

impl From<Comment> for Declaration {
    fn from(comment: Comment) -> Self {
        Self::Comment(comment)
    }
}

impl Node for Program {
    fn kind(&self) -> NodeKind {
        NodeKind::Program
    }

    fn label(&self) -> String {
        format!("Program: {{declarations: {}}}", self.declarations.len())
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_program(self);
    }
}

impl Node for Declaration {
    fn kind(&self) -> NodeKind {
        match self {
            Self::Comment(c) => c.kind(),
        }
    }

    fn label(&self) -> String {
        match self {
            Self::Comment(c) => c.label(),
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Self::Comment(c) => c.accept(visitor),
        }
    }
}

impl Node for Comment {
    fn kind(&self) -> NodeKind {
        NodeKind::Comment
    }

    fn label(&self) -> String {
        format!("Comment: {{words: {}}}", self.words.len())
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_comment(self);
    }
}

impl Node for Word {
    fn kind(&self) -> NodeKind {
        NodeKind::Word
    }

    fn label(&self) -> String {
        self.text.clone()
    }

    /// Leaf node: the visitor gets the word itself, and `word.text` is
    /// the literal as written in the source.
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_word(self);
    }
}

/// Tree traversal. The default methods walk children in order, so an
/// implementation only overrides the nodes it cares about.
pub trait Visitor {
    fn visit_program(&mut self, program: &Program) {
        walk_program(self, program);
    }

    fn visit_comment(&mut self, comment: &Comment) {
        walk_comment(self, comment);
    }

    /// Called once per word. `word.text` is the verbatim identifier or
    /// keyword, so this is where a visitor reads the comment's text.
    fn visit_word(&mut self, _word: &Word) {}
}

pub fn walk_program<V: Visitor + ?Sized>(visitor: &mut V, program: &Program) {
    for decl in &program.declarations {
        decl.accept(visitor);
    }
}

pub fn walk_comment<V: Visitor + ?Sized>(visitor: &mut V, comment: &Comment) {
    for word in &comment.words {
        word.accept(visitor);
    }
}

/// Collects every word's text in document order.
#[derive(Debug, Default)]
pub struct WordCollector {
    pub words: Vec<String>,
}

impl Visitor for WordCollector {
    fn visit_word(&mut self, word: &Word) {
        self.words.push(word.text.clone());
    }
}

/// Renders an indented outline of node labels, one node per line.
#[derive(Debug, Default)]
pub struct Outline {
    out: String,
    depth: usize,
}

impl Outline {
    #[must_use]
    pub fn render<N: Node + ?Sized>(node: &N) -> String {
        let mut outline = Self::default();
        node.accept(&mut outline);
        outline.out
    }

    fn line(&mut self, label: &str) {
        let _ = writeln!(self.out, "{:indent$}{label}", "", indent = self.depth * 2);
    }
}

impl Visitor for Outline {
    fn visit_program(&mut self, program: &Program) {
        self.line(&program.label());
        self.depth += 1;
        walk_program(self, program);
        self.depth -= 1;
    }

    fn visit_comment(&mut self, comment: &Comment) {
        self.line(&comment.label());
        self.depth += 1;
        walk_comment(self, comment);
        self.depth -= 1;
    }

    fn visit_word(&mut self, word: &Word) {
        self.line(&word.label());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(words: &[&str]) -> Comment {
        Comment {
            words: words
                .iter()
                .enumerate()
                .map(|(i, w)| Word::new(*w, Span::new(1, i)))
                .collect(),
            span: Span::new(1, 0),
        }
    }

    #[test]
    fn tags() {
        let c = comment(&["a"]);
        assert_eq!(c.kind(), NodeKind::Comment);
        assert_eq!(c.words[0].kind(), NodeKind::Word);
        assert_eq!(Program::new().kind(), NodeKind::Program);
        assert_eq!(Declaration::from(c).kind(), NodeKind::Comment);
    }

    #[test]
    fn labels() {
        let mut program = Program::new();
        program.declarations.push(comment(&["if", "else"]).into());
        assert_eq!(program.label(), "Program: {declarations: 1}");
        assert_eq!(program.declarations[0].label(), "Comment: {words: 2}");
        assert_eq!(Word::new("if", Span::default()).label(), "if");
    }

    #[test]
    fn collector_visits_words_in_order() {
        let mut program = Program::new();
        program.declarations.push(comment(&["a", "b"]).into());
        program.declarations.push(comment(&["c"]).into());

        let mut collector = WordCollector::default();
        program.accept(&mut collector);
        assert_eq!(collector.words, ["a", "b", "c"]);
    }

    #[test]
    fn outline_indents_children() {
        let mut program = Program::new();
        program.declarations.push(comment(&["if", "else"]).into());
        assert_eq!(
            Outline::render(&program),
            "Program: {declarations: 1}\n  Comment: {words: 2}\n    if\n    else\n"
        );
    }
}
