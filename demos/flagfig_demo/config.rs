//! Demo config struct.

use std::collections::HashMap;
use std::time::Duration;

use flagfig::{Field, FlagConfig};

#[derive(Debug, Default)]
pub struct Specification {
    pub debug: bool,
    pub port: isize,
    pub user: String,
    pub user_name: String,
    pub users: Vec<String>,
    pub user_array: Vec<String>,
    pub rate: f64,
    pub rate_of_travel: f32,
    pub timeout: Duration,
    pub timeout2: Duration,
    pub int8: i8,
    pub nint8: i8,
    pub uint8: u8,
    pub int16: i16,
    pub nint16: i16,
    pub uint16: u16,
    pub int32: i32,
    pub nint32: i32,
    pub uint32: u32,
    pub color_codes: HashMap<String, i32>,
}

impl FlagConfig for Specification {
    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![
            Field::new("Debug", &mut self.debug).usage("enable debug mode"),
            Field::new("Port", &mut self.port)
                .short("p")
                .default("8080")
                .usage("primary ip port"),
            Field::new("User", &mut self.user).usage("user for ..."),
            Field::new("UserName", &mut self.user_name).env("USER_NAME"),
            Field::new("Users", &mut self.users),
            Field::new("UserArray", &mut self.user_array)
                .default("asdfx,asdfy,asdfz,asdf0,asdf1"),
            Field::new("Rate", &mut self.rate),
            Field::new("RateOfTravel", &mut self.rate_of_travel).default("3.5"),
            Field::new("Timeout", &mut self.timeout).default("720h1m3s"),
            Field::new("Timeout2", &mut self.timeout2).default("720h1m3s"),
            Field::new("Int8", &mut self.int8)
                .short("i8")
                .default("127")
                .usage("int8 test"),
            Field::new("Nint8", &mut self.nint8)
                .short("n8")
                .default("-128")
                .usage("nint8 test"),
            Field::new("Uint8", &mut self.uint8)
                .short("u8")
                .default("255")
                .usage("uint8 test"),
            Field::new("Int16", &mut self.int16)
                .short("i16")
                .default("32767")
                .usage("int16 test"),
            Field::new("Nint16", &mut self.nint16)
                .short("n16")
                .default("-32768")
                .usage("nint16 test"),
            Field::new("Uint16", &mut self.uint16)
                .short("u16")
                .default("65535")
                .usage("uint16 test"),
            Field::new("Int32", &mut self.int32)
                .short("i32")
                .default("1048576")
                .usage("int32 test"),
            Field::new("Nint32", &mut self.nint32)
                .short("n32")
                .default("-1232")
                .usage("nint32 test"),
            Field::new("Uint32", &mut self.uint32)
                .short("u32")
                .default("255")
                .usage("uint32 test"),
            // Logged and skipped: maps cannot be set from a flag.
            Field::new("ColorCodes", &mut self.color_codes),
        ]
    }
}
