use std::io::{ErrorKind, Read, Write};
use std::thread;
use std::time::Duration;

use crate::error::Error;

const BAUD_RATE: u32 = 115_200;
const READ_TIMEOUT: Duration = Duration::from_secs(2);
const BOOT_SETTLE: Duration = Duration::from_secs(2);

pub fn list_ports() -> Vec<String> {
    match serialport::available_ports() {
        Ok(ports) => ports.into_iter().map(|p| p.port_name).collect(),
        Err(_) => Vec::new(),
    }
}

pub fn open_device(path: &str) -> Result<Box<dyn serialport::SerialPort>, Error> {
    let builder = serialport::new(path, BAUD_RATE)
        .timeout(READ_TIMEOUT)
        .open();

    let device = match builder {
        Ok(device) => device,
        Err(e) => return Err(Error::Connection(format!("Cannot open serial port: {}", e))),
    };

    // Opening the port resets most ESP32 dev boards; give the firmware time to boot.
    thread::sleep(BOOT_SETTLE);

    Ok(device)
}

pub fn send_line<T: Write>(device: &mut T, text: &str) -> Result<(), Error> {
    let line = format!("{}\n", text);

    if let Err(e) = device.write_all(line.as_bytes()) {
        return Err(Error::Connection(format!("Cannot write to serial port: {}", e)));
    }

    if let Err(e) = device.flush() {
        return Err(Error::Connection(format!("Cannot write to serial port: {}", e)));
    }

    Ok(())
}

pub fn receive_line<T: Read>(device: &mut T) -> Result<String, Error> {
    let mut buf = Vec::new();
    let mut byte = [0u8; 1];

    loop {
        match device.read(&mut byte) {
            Ok(0) => break,
            Ok(_) => {
                if byte[0] == b'\n' {
                    break;
                }
                buf.push(byte[0]);
            }
            Err(e) if e.kind() == ErrorKind::TimedOut || e.kind() == ErrorKind::WouldBlock => break,
            Err(e) => {
                return Err(Error::Connection(format!("Cannot read from serial port: {}", e)))
            }
        }
    }

    Ok(String::from_utf8_lossy(&buf).trim().to_string())
}
