//! Incremental PDF writer: page content is written as soon as a page ends, while the
//! page tree, resources and catalog are held back until the document is finished.

use lopdf::content::Content;
use lopdf::{Dictionary, Object, ObjectId, Stream, StringFormat, dictionary};
use std::collections::BTreeMap;
use std::io::{self, Write};

/// Wraps a writer and tracks the byte offset needed for the cross-reference table.
struct CountingWriter<W: Write> {
    inner: W,
    offset: u64,
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.offset += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

pub struct StreamingPdfWriter<W: Write> {
    writer: CountingWriter<W>,
    offsets: BTreeMap<u32, u64>,
    max_id: u32,
    pub catalog_id: ObjectId,
    pub pages_id: ObjectId,
    pub resources_id: ObjectId,
    page_ids: Vec<ObjectId>,
    deferred: BTreeMap<ObjectId, Object>,
}

impl<W: Write> StreamingPdfWriter<W> {
    pub fn new(writer: W, version: &str) -> io::Result<Self> {
        let mut writer = CountingWriter { inner: writer, offset: 0 };
        writer.write_all(format!("%PDF-{}\n", version).as_bytes())?;
        writer.write_all(b"%\xE2\xE3\xCF\xD3\n")?;

        Ok(Self {
            writer,
            offsets: BTreeMap::new(),
            max_id: 3,
            resources_id: (1, 0),
            pages_id: (2, 0),
            catalog_id: (3, 0),
            page_ids: Vec::new(),
            deferred: BTreeMap::new(),
        })
    }

    pub fn new_object_id(&mut self) -> ObjectId {
        self.max_id += 1;
        (self.max_id, 0)
    }

    /// Writes an object immediately and returns its id.
    pub fn write_object(&mut self, object: &Object) -> io::Result<ObjectId> {
        let id = self.new_object_id();
        self.write_object_at(id, object)?;
        Ok(id)
    }

    /// Holds an object back until [`finish`](Self::finish), e.g. because it must reference
    /// ids that do not exist yet.
    pub fn defer_object_at(&mut self, id: ObjectId, object: Object) {
        self.deferred.insert(id, object);
    }

    pub fn write_content_stream(&mut self, content: &Content) -> io::Result<ObjectId> {
        let encoded = content.encode().map_err(|e| io::Error::other(e.to_string()))?;
        self.write_object(&Object::Stream(Stream::new(dictionary! {}, encoded)))
    }

    /// Writes a page dictionary pointing at `contents` and appends it to the page tree.
    pub fn write_page(
        &mut self,
        contents: ObjectId,
        width: f32,
        height: f32,
    ) -> io::Result<ObjectId> {
        let page = dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
            "Contents" => contents,
            "Resources" => self.resources_id,
        };
        let id = self.write_object(&Object::Dictionary(page))?;
        self.page_ids.push(id);
        Ok(id)
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    pub fn finish(mut self, resources: Dictionary, info: Option<Dictionary>) -> io::Result<W> {
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => self
                .page_ids
                .iter()
                .map(|id| Object::Reference(*id))
                .collect::<Vec<Object>>(),
            "Count" => self.page_ids.len() as i64,
        };
        self.defer_object_at(self.pages_id, pages.into());
        self.defer_object_at(self.resources_id, resources.into());
        self.defer_object_at(
            self.catalog_id,
            dictionary! { "Type" => "Catalog", "Pages" => self.pages_id }.into(),
        );
        let info_id = match info {
            Some(info) => {
                let id = self.new_object_id();
                self.defer_object_at(id, info.into());
                Some(id)
            }
            None => None,
        };

        for (id, object) in std::mem::take(&mut self.deferred) {
            self.write_object_at(id, &object)?;
        }

        let xref_start = self.writer.offset;
        self.write_xref()?;

        let mut trailer = dictionary! {
            "Size" => (self.max_id + 1) as i64,
            "Root" => self.catalog_id,
        };
        if let Some(info_id) = info_id {
            trailer.set("Info", info_id);
        }
        writeln!(self.writer, "trailer")?;
        serialize::write_dictionary(&mut self.writer, &trailer)?;
        writeln!(self.writer, "\nstartxref\n{}", xref_start)?;
        write!(self.writer, "%%EOF")?;

        self.writer.flush()?;
        Ok(self.writer.inner)
    }

    fn write_object_at(&mut self, id: ObjectId, object: &Object) -> io::Result<()> {
        self.offsets.insert(id.0, self.writer.offset);
        writeln!(self.writer, "{} {} obj", id.0, id.1)?;
        serialize::write_object(&mut self.writer, object)?;
        writeln!(self.writer, "\nendobj")
    }

    /// Single-section table; every id up to `max_id` is allocated, unused ones are free.
    fn write_xref(&mut self) -> io::Result<()> {
        writeln!(self.writer, "xref\n0 {}", self.max_id + 1)?;
        writeln!(self.writer, "0000000000 65535 f ")?;
        for id in 1..=self.max_id {
            match self.offsets.get(&id) {
                Some(offset) => writeln!(self.writer, "{:010} 00000 n ", offset)?,
                None => writeln!(self.writer, "0000000000 65535 f ")?,
            }
        }
        Ok(())
    }
}

mod serialize {
    use super::*;

    pub fn write_object(writer: &mut dyn Write, object: &Object) -> io::Result<()> {
        match object {
            Object::Null => writer.write_all(b"null"),
            Object::Boolean(b) => writer.write_all(if *b { b"true" } else { b"false" }),
            Object::Integer(i) => write!(writer, "{}", i),
            Object::Real(r) => {
                let value = if r.is_finite() { *r } else { 0.0 };
                write!(writer, "{:.3}", value)
            }
            Object::Name(n) => {
                writer.write_all(b"/")?;
                writer.write_all(n)
            }
            Object::String(s, StringFormat::Literal) => {
                writer.write_all(b"(")?;
                for &byte in s {
                    match byte {
                        b'(' | b')' | b'\\' => writer.write_all(&[b'\\', byte])?,
                        b'\r' => writer.write_all(b"\\r")?,
                        b'\n' => writer.write_all(b"\\n")?,
                        _ => writer.write_all(&[byte])?,
                    }
                }
                writer.write_all(b")")
            }
            Object::String(s, StringFormat::Hexadecimal) => {
                writer.write_all(b"<")?;
                for byte in s {
                    write!(writer, "{:02X}", byte)?;
                }
                writer.write_all(b">")
            }
            Object::Array(items) => {
                writer.write_all(b"[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        writer.write_all(b" ")?;
                    }
                    write_object(writer, item)?;
                }
                writer.write_all(b"]")
            }
            Object::Dictionary(dict) => write_dictionary(writer, dict),
            Object::Stream(stream) => {
                let mut dict = stream.dict.clone();
                dict.set("Length", stream.content.len() as i64);
                write_dictionary(writer, &dict)?;
                writer.write_all(b"\nstream\n")?;
                writer.write_all(&stream.content)?;
                writer.write_all(b"\nendstream")
            }
            Object::Reference(id) => write!(writer, "{} {} R", id.0, id.1),
        }
    }

    pub fn write_dictionary(writer: &mut dyn Write, dict: &Dictionary) -> io::Result<()> {
        writer.write_all(b"<<")?;
        let sorted: BTreeMap<_, _> = dict.iter().collect();
        for (key, value) in sorted {
            writer.write_all(b"/")?;
            writer.write_all(key)?;
            writer.write_all(b" ")?;
            write_object(writer, value)?;
            writer.write_all(b" ")?;
        }
        writer.write_all(b">>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::Operation;

    #[test]
    fn writes_a_document_lopdf_can_read_back() {
        let mut writer = StreamingPdfWriter::new(Vec::new(), "1.7").unwrap();
        let content = Content {
            operations: vec![
                Operation::new("re", vec![10.into(), 10.into(), 50.into(), 50.into()]),
                Operation::new("f", vec![]),
            ],
        };
        let contents = writer.write_content_stream(&content).unwrap();
        writer.write_page(contents, 200.0, 300.0).unwrap();
        assert_eq!(writer.page_count(), 1);

        let info = dictionary! { "Title" => Object::string_literal("Sample") };
        let bytes = writer.finish(Dictionary::new(), Some(info)).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7"));
        assert!(bytes.ends_with(b"%%EOF"));

        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }
}
