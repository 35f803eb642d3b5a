/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![cfg(feature = "serde-support")]

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::image::RasterImage;

/// Image information, pixel data is not serialized
impl Serialize for RasterImage {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        const STRUCT_FIELDS: usize = 6;
        let mut state = serializer.serialize_struct("RasterImage", STRUCT_FIELDS)?;

        state.serialize_field("width", &self.width)?;
        state.serialize_field("height", &self.height)?;
        state.serialize_field("format", &self.format)?;
        state.serialize_field("format_id", &self.format.to_u8())?;
        state.serialize_field("mip_levels", &self.mip_levels)?;
        state.serialize_field("data_size", &self.pixels.len())?;

        state.end()
    }
}
