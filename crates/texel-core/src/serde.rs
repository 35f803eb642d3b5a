#![cfg(feature = "serde")]

use alloc::format;

use serde::ser::*;

use crate::color::Rgba8;
use crate::pixel_format::PixelFormat;
use crate::rect::Rect;

impl Serialize for PixelFormat {
    #[allow(clippy::uninlined_format_args)]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        // format serialization is simply it's debug value
        serializer.serialize_str(&format!("{:?}", self))
    }
}

impl Serialize for Rgba8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut tuple = serializer.serialize_tuple(4)?;
        tuple.serialize_element(&self.r)?;
        tuple.serialize_element(&self.g)?;
        tuple.serialize_element(&self.b)?;
        tuple.serialize_element(&self.a)?;
        tuple.end()
    }
}

impl Serialize for Rect {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut state = serializer.serialize_struct("Rect", 4)?;
        state.serialize_field("x", &self.x)?;
        state.serialize_field("y", &self.y)?;
        state.serialize_field("width", &self.width)?;
        state.serialize_field("height", &self.height)?;
        state.end()
    }
}
