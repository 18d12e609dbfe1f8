#[cfg(test)]
pub mod test {
    use std::collections::HashMap;
    use std::time::Duration;

    use crate::field::{Field, FlagConfig};

    #[derive(Debug, Default, PartialEq)]
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
        pub int8: i8,
        pub nint8: i8,
        pub uint8: u8,
        pub int16: i16,
        pub uint16: u16,
        pub int32: i32,
        pub uint32: u32,
        pub int64: i64,
        pub uint64: u64,
        pub count: usize,
        pub color_codes: HashMap<String, i64>,
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
                Field::new("UserArray", &mut self.user_array).default("asdfx,asdfy,asdfz"),
                Field::new("Rate", &mut self.rate),
                Field::new("RateOfTravel", &mut self.rate_of_travel).default("2.5"),
                Field::new("Timeout", &mut self.timeout).default("720h1m3s"),
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
                Field::new("Int16", &mut self.int16).default("32767"),
                Field::new("Uint16", &mut self.uint16).default("65535"),
                Field::new("Int32", &mut self.int32).default("1048576"),
                Field::new("Uint32", &mut self.uint32).default("255"),
                Field::new("Int64", &mut self.int64),
                Field::new("Uint64", &mut self.uint64),
                Field::new("Count", &mut self.count).name("max-count"),
                Field::new("ColorCodes", &mut self.color_codes),
            ]
        }
    }

    /// A single `u8` field with a configurable default.
    #[derive(Debug, Default)]
    pub struct Level {
        pub level: u8,
        pub default: &'static str,
    }

    impl FlagConfig for Level {
        fn fields(&mut self) -> Vec<Field<'_>> {
            vec![Field::new("Level", &mut self.level).default(self.default)]
        }
    }

    /// Two fields that derive the same external name.
    #[derive(Debug, Default)]
    pub struct Colliding {
        pub user_id: String,
        pub user_i_d: String,
    }

    impl FlagConfig for Colliding {
        fn fields(&mut self) -> Vec<Field<'_>> {
            vec![
                Field::new("UserID", &mut self.user_id),
                Field::new("UserId", &mut self.user_i_d),
            ]
        }
    }

    #[test]
    fn specification_lists_fields_in_order() {
        let mut spec = Specification::default();
        let idents: Vec<_> = spec.fields().iter().map(|f| f.ident()).collect();
        assert_eq!(idents.first(), Some(&"Debug"));
        assert_eq!(idents.last(), Some(&"ColorCodes"));
        assert_eq!(idents.len(), 20);
    }
}
