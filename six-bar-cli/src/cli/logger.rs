use serde::ser::SerializeSeq as _;
use std::io::Write;

macro_rules! impl_disp_methods {
    ($(($method:ident, $ty:ty)),+ $(,)?) => {$(
        fn $method(self, v: $ty) -> Result<Self::Ok, Self::Error> {
            write!(self.writer, "{v}").map_err(Error)
        }
    )+};
}

#[derive(Debug)]
pub(crate) struct Error(std::io::Error);
impl std::error::Error for Error {}
impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
impl serde::ser::Error for Error {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        Self(std::io::Error::other(msg.to_string()))
    }
}

/// A TOML-like serializer for the synthesis logs.
///
/// Structs and maps become `key = value` lines under a `[section]`,
/// sequences become inline arrays and `None` becomes `none`. A newtype
/// variant writes its name as the `kind` field, then its fields. Map keys
/// are written bare, like struct fields.
pub(crate) struct Logger<W: Write> {
    writer: W,
    sections: usize,
}

/// Digits of the floating point numbers.
const PREC: usize = 4;

impl<W: Write> Logger<W> {
    pub(crate) fn new(writer: W) -> Self {
        Self { writer, sections: 0 }
    }

    pub(crate) fn section(&mut self, title: &str) -> std::io::Result<()> {
        if self.sections > 0 {
            writeln!(self.writer)?;
        }
        self.sections += 1;
        writeln!(self.writer, "[{title}]")
    }

    pub(crate) fn log<S: serde::Serialize>(&mut self, s: S) -> std::io::Result<()> {
        s.serialize(self).map_err(|e| e.0)
    }

    pub(crate) fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }
}

impl<'a, W: Write> serde::Serializer for &'a mut Logger<W> {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Seq<'a, W>;
    type SerializeTuple = Seq<'a, W>;
    type SerializeTupleStruct = Seq<'a, W>;
    type SerializeTupleVariant = Seq<'a, W>;
    type SerializeMap = Self;
    type SerializeStruct = Self;
    type SerializeStructVariant = Self;

    impl_disp_methods!(
        (serialize_bool, bool),
        (serialize_i8, i8),
        (serialize_i16, i16),
        (serialize_i32, i32),
        (serialize_i64, i64),
        (serialize_u8, u8),
        (serialize_u16, u16),
        (serialize_u32, u32),
        (serialize_u64, u64),
    );

    fn serialize_f32(self, v: f32) -> Result<Self::Ok, Self::Error> {
        self.serialize_f64(v as f64)
    }

    fn serialize_f64(self, v: f64) -> Result<Self::Ok, Self::Error> {
        write!(self.writer, "{:.*}", PREC, v).map_err(Error)
    }

    fn serialize_char(self, v: char) -> Result<Self::Ok, Self::Error> {
        write!(self.writer, "{:?}", v.to_string()).map_err(Error)
    }

    fn serialize_str(self, v: &str) -> Result<Self::Ok, Self::Error> {
        write!(self.writer, "{v:?}").map_err(Error)
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Self::Ok, Self::Error> {
        let mut seq = self.serialize_seq(Some(v.len()))?;
        v.iter().try_for_each(|b| seq.serialize_element(b))?;
        seq.end()
    }

    fn serialize_none(self) -> Result<Self::Ok, Self::Error> {
        write!(self.writer, "none").map_err(Error)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Self::Ok, Self::Error>
    where
        T: ?Sized + serde::Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok, Self::Error> {
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok, Self::Error> {
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Self::Ok, Self::Error> {
        self.serialize_str(variant)
    }

    fn serialize_newtype_struct<T>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Self::Ok, Self::Error>
    where
        T: ?Sized + serde::Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Self::Ok, Self::Error>
    where
        T: ?Sized + serde::Serialize,
    {
        writeln!(self.writer, "kind = {variant:?}").map_err(Error)?;
        value.serialize(self)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, Self::Error> {
        write!(self.writer, "[").map_err(Error)?;
        Ok(Seq { logger: self, first: true })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple, Self::Error> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct, Self::Error> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleVariant, Self::Error> {
        write!(self.writer, "{variant:?} = ").map_err(Error)?;
        self.serialize_seq(Some(len))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, Self::Error> {
        Ok(self)
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, Self::Error> {
        Ok(self)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, Self::Error> {
        Ok(self)
    }
}

pub(crate) struct Seq<'a, W: Write> {
    logger: &'a mut Logger<W>,
    first: bool,
}

macro_rules! impl_ser_seq {
    ($(($ty:ident, $method:ident)),+ $(,)?) => {$(
        impl<W: Write> serde::ser::$ty for Seq<'_, W> {
            type Ok = ();
            type Error = Error;

            fn $method<T>(&mut self, value: &T) -> Result<Self::Ok, Self::Error>
            where
                T: ?Sized + serde::Serialize,
            {
                if !std::mem::take(&mut self.first) {
                    write!(self.logger.writer, ", ").map_err(Error)?;
                }
                value.serialize(&mut *self.logger)
            }

            fn end(self) -> Result<Self::Ok, Self::Error> {
                write!(self.logger.writer, "]").map_err(Error)
            }
        }
    )+};
}

impl_ser_seq!(
    (SerializeSeq, serialize_element),
    (SerializeTuple, serialize_element),
    (SerializeTupleStruct, serialize_field),
    (SerializeTupleVariant, serialize_field),
);

impl<W: Write> serde::ser::SerializeMap for &mut Logger<W> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<Self::Ok, Self::Error>
    where
        T: ?Sized + serde::Serialize,
    {
        let mut buf = Logger::new(Vec::new());
        key.serialize(&mut buf)?;
        let key = String::from_utf8_lossy(&buf.writer);
        write!(self.writer, "{} = ", key.trim_matches('"')).map_err(Error)
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<Self::Ok, Self::Error>
    where
        T: ?Sized + serde::Serialize,
    {
        value.serialize(&mut **self)?;
        writeln!(self.writer).map_err(Error)
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        Ok(())
    }
}

macro_rules! impl_ser_map {
    ($($ty:ident),+ $(,)?) => {$(
        impl<W: Write> serde::ser::$ty for &mut Logger<W> {
            type Ok = ();
            type Error = Error;

            fn serialize_field<T>(
                &mut self,
                key: &'static str,
                value: &T,
            ) -> Result<Self::Ok, Self::Error>
            where
                T: ?Sized + serde::Serialize,
            {
                write!(self.writer, "{key} = ").map_err(Error)?;
                value.serialize(&mut **self)?;
                writeln!(self.writer).map_err(Error)
            }

            fn end(self) -> Result<Self::Ok, Self::Error> {
                Ok(())
            }
        }
    )+};
}

impl_ser_map!(SerializeStruct, SerializeStructVariant);

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(serde::Serialize)]
    struct Row {
        name: &'static str,
        cost: f64,
        mu: [f64; 2],
        ok: Option<bool>,
    }

    #[test]
    fn toml_like() {
        let mut buf = Vec::new();
        let mut log = Logger::new(&mut buf);
        log.section("crank").unwrap();
        log.log(Row { name: "W1", cost: 0.25, mu: [1., 2.5], ok: None }).unwrap();
        log.section("crank.result").unwrap();
        drop(log);
        let s = String::from_utf8(buf).unwrap();
        assert_eq!(
            s,
            "[crank]\nname = \"W1\"\ncost = 0.2500\nmu = [1.0000, 2.5000]\nok = none\n\n[crank.result]\n"
        );
    }

    #[test]
    fn bare_map_keys() {
        let mut buf = Vec::new();
        let mut log = Logger::new(&mut buf);
        let joints = std::collections::BTreeMap::from([("A", [0., 1.]), ("B", [2., 0.5])]);
        log.log(joints).unwrap();
        drop(log);
        let s = String::from_utf8(buf).unwrap();
        assert_eq!(s, "A = [0.0000, 1.0000]\nB = [2.0000, 0.5000]\n");
    }
}
