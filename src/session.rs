use std::collections::HashMap;
use std::io::{Read, Write};

use serde_json::json;

use crate::device;
use crate::error::Error;
use crate::schema::{self, ParameterDescriptor};

#[derive(Default)]
pub struct Session {
    pub device: Option<Box<dyn serialport::SerialPort>>,
    pub schema: Vec<ParameterDescriptor>,
    pub edits: HashMap<String, String>,
}

impl Session {
    pub fn is_connected(&self) -> bool {
        self.device.is_some()
    }

    pub fn connect(&mut self, port: &str) -> Result<(), Error> {
        self.disconnect();
        self.device = Some(device::open_device(port)?);
        Ok(())
    }

    pub fn disconnect(&mut self) {
        self.device = None;
        self.schema.clear();
        self.edits.clear();
    }

    pub fn fetch_schema(&mut self) -> Result<(), Error> {
        let device = match self.device.as_mut() {
            Some(device) => device,
            None => return Err(Error::Connection("No open connection".to_string())),
        };

        let params = request_schema(device)?;
        self.install_schema(params);
        Ok(())
    }

    pub fn install_schema(&mut self, params: Vec<ParameterDescriptor>) {
        self.edits = params
            .iter()
            .map(|p| (p.key.clone(), p.initial_text()))
            .collect();
        self.schema = params;
    }

    pub fn save_all(&mut self) -> Result<(), Error> {
        let device = match self.device.as_mut() {
            Some(device) => device,
            None => return Err(Error::Connection("No open connection".to_string())),
        };

        save_fields(device, &self.schema, &self.edits)
    }
}

pub fn request_schema<T: Read + Write>(device: &mut T) -> Result<Vec<ParameterDescriptor>, Error> {
    device::send_line(device, "GET_SCHEMA")?;
    let line = device::receive_line(device)?;
    schema::parse_schema(&line)
}

pub fn save_fields<T: Read + Write>(
    device: &mut T,
    schema: &[ParameterDescriptor],
    edits: &HashMap<String, String>,
) -> Result<(), Error> {
    for p in schema {
        let text = edits.get(&p.key).map(String::as_str).unwrap_or("");
        let value = p.validate(text)?;

        let command = format!("SET_VAR:{}", json!({ "key": p.key, "val": value }));
        device::send_line(device, &command)?;

        let response = device::receive_line(device)?;
        if !response.contains("OK") {
            return Err(Error::Device {
                key: p.key.clone(),
                response,
            });
        }
    }

    Ok(())
}
