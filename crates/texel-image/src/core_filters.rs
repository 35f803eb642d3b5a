/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core filters
//!
//! These are operations the image type itself needs, other
//! crates build on top of them.
pub mod reformat;
