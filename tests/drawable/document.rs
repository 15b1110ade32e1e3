use std::fmt;

use rubber_types::{model_get, spec, Model, TypeErasure};

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

pub type Drawing = TypeErasure<dyn Drawable>;
pub type Document = Vec<Drawing>;

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

pub fn render(doc: &Document) -> String {
    let mut out = String::new();
    doc.draw(&mut out, 0).expect("writing to a String never fails");
    out
}

/// Snapshots of one document; the last one is current.
pub struct History {
    documents: Vec<Document>,
}

impl History {
    pub fn new() -> Self {
        History {
            documents: vec![Document::new()],
        }
    }

    pub fn commit(&mut self) {
        let snapshot = self.current().clone();
        self.documents.push(snapshot);
    }

    /// Drops the current document. The first one is never dropped.
    pub fn undo(&mut self) -> bool {
        if self.documents.len() == 1 {
            return false;
        }
        self.documents.pop();
        true
    }

    pub fn current(&mut self) -> &mut Document {
        let last = self.documents.len() - 1;
        &mut self.documents[last]
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }
}

/// A writer that fails once `capacity` bytes have been written.
pub struct BoundedWriter {
    pub written: String,
    pub capacity: usize,
}

impl fmt::Write for BoundedWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.written.len() + s.len() > self.capacity {
            return Err(fmt::Error);
        }
        self.written.push_str(s);
        Ok(())
    }
}
