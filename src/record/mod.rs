//! Record encoding
//!
//! Turns values into newline-terminated JSON text for the ingestion sink

mod value;

pub use value::{RecordValue, SerializeError, ToRecord};

use crate::feed::Quote;

impl ToRecord for Quote {
    fn to_record(&self) -> RecordValue {
        RecordValue::Object(vec![
            ("symbol".to_string(), self.symbol.as_str().into()),
            ("timestamp".to_string(), self.timestamp.into()),
            ("open".to_string(), self.open.into()),
            ("high".to_string(), self.high.into()),
            ("low".to_string(), self.low.into()),
            ("close".to_string(), self.close.into()),
            ("volume".to_string(), self.volume.into()),
        ])
    }
}

/// Encode a value as one UTF-8 JSON line terminated by `\n`
pub fn encode<T: ToRecord + ?Sized>(value: &T) -> Result<Vec<u8>, SerializeError> {
    let json = value.to_record().to_json()?;
    let mut buf = serde_json::to_vec(&json)?;
    buf.push(b'\n');
    Ok(buf)
}
