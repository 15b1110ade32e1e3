//! A document editor with undo history.
//!
//! Items of unrelated types (integers, strings, whole documents) live side by
//! side in one document. Committing the history copies the document, and
//! with it every item handle; the items themselves are shared and never
//! copied.
//!
//! Run with `RUST_LOG=rubber_types=trace` to see payloads being erased and
//! released.

use std::fmt;

use rubber_types::{model_get, spec, Model, TypeErasure};
use tracing_subscriber::EnvFilter;

/// The payload side: types that know how to draw themselves.
pub trait Draw {
    fn draw(&self, out: &mut dyn fmt::Write, pos: usize) -> fmt::Result;
}

#[spec]
pub trait Drawable {
    fn draw_at(&self, out: &mut dyn fmt::Write, pos: usize) -> fmt::Result;
}

impl<T: Draw> Drawable for Model<T> {
    fn draw_at(&self, out: &mut dyn fmt::Write, pos: usize) -> fmt::Result {
        model_get(self).draw(out, pos)
    }
}

type Drawing = TypeErasure<dyn Drawable>;
type Document = Vec<Drawing>;

impl Draw for i32 {
    fn draw(&self, out: &mut dyn fmt::Write, pos: usize) -> fmt::Result {
        writeln!(out, "{:indent$}{}", "", self, indent = pos * 2)
    }
}

impl Draw for String {
    fn draw(&self, out: &mut dyn fmt::Write, pos: usize) -> fmt::Result {
        writeln!(out, "{:indent$}{}", "", self, indent = pos * 2)
    }
}

impl Draw for Document {
    fn draw(&self, out: &mut dyn fmt::Write, pos: usize) -> fmt::Result {
        writeln!(out, "{:indent$}<document>", "", indent = pos * 2)?;
        for item in self {
            item.draw_at(out, pos + 1)?;
        }
        writeln!(out, "{:indent$}</document>", "", indent = pos * 2)
    }
}

/// Snapshots of a document. There is always a current one.
struct History {
    documents: Vec<Document>,
}

impl History {
    fn new() -> Self {
        History {
            documents: vec![Document::new()],
        }
    }

    fn commit(&mut self) {
        let snapshot = self.current().clone();
        self.documents.push(snapshot);
    }

    fn undo(&mut self) -> bool {
        if self.documents.len() == 1 {
            return false;
        }
        self.documents.pop();
        true
    }

    fn current(&mut self) -> &mut Document {
        let last = self.documents.len() - 1;
        &mut self.documents[last]
    }
}

fn show(doc: &Document) -> Result<String, fmt::Error> {
    let mut out = String::new();
    doc.draw(&mut out, 0)?;
    Ok(out)
}

fn main() -> Result<(), fmt::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut history = History::new();

    history.current().push(Drawing::new(0));
    history.current().push(Drawing::new(1));
    print!("{}", show(history.current())?);
    println!("--------------------------");

    history.commit();

    history.current().push(Drawing::new(String::from("Hello World")));
    let nested = history.current().clone();
    history.current().push(Drawing::new(nested));
    history.current()[1] = Drawing::new(String::from("Roof"));
    print!("{}", show(history.current())?);
    println!("--------------------------");

    history.undo();
    print!("{}", show(history.current())?);

    Ok(())
}
