//! Server-rendered HTML. Templates are compiled into the binary and rendered with Tera
//! (autoescaping on, as for every `.html` template).

use crate::service::RecordResponse;
use tera::{Context, Tera};

const INDEX: &str = "index.html";

pub struct Views {
    tera: Tera,
}

impl Views {
    pub fn load() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_template(INDEX, include_str!("../templates/index.html"))?;
        Ok(Views { tera })
    }

    /// Index page: creation form followed by every record, newest first.
    pub fn index_page(&self, records: &[RecordResponse]) -> Result<String, tera::Error> {
        let mut context = Context::new();
        context.insert("records", records);
        self.tera.render(INDEX, &context)
    }
}
