// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A two-tone grayscale pixel grid.  The rasterizer is its only writer;
//! anything that can take eight-bit gray rows can consume it.

use error::{Error, Result};
use image::ColorType;
use std::path::Path;
use std::str::FromStr;

/// Which way round the two tones go.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ColorTheme {
    /// White curve on black.
    Dark,
    /// Black curve on white.
    Light,
}

impl ColorTheme {
    /// (background, foreground) intensities.
    pub fn tones(self) -> (u8, u8) {
        match self {
            ColorTheme::Dark => (0, 255),
            ColorTheme::Light => (255, 0),
        }
    }
}

impl Default for ColorTheme {
    fn default() -> ColorTheme {
        ColorTheme::Dark
    }
}

impl FromStr for ColorTheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<ColorTheme> {
        match s {
            "dark" => Ok(ColorTheme::Dark),
            "light" => Ok(ColorTheme::Light),
            _ => Err(Error::InvalidParameter(format!(
                "color theme must be 'dark' or 'light', got '{}'",
                s
            ))),
        }
    }
}

/// Row-major gray pixels, row 0 at the top.
#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    width: usize,
    height: usize,
    background: u8,
    foreground: u8,
    pixels: Vec<u8>,
}

impl Canvas {
    /// A canvas filled with the theme's background.
    pub fn new(width: usize, height: usize, theme: ColorTheme) -> Result<Canvas> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidParameter(
                "image dimensions must be at least 1x1".to_string(),
            ));
        }
        let (background, foreground) = theme.tones();
        Ok(Canvas {
            width,
            height,
            background,
            foreground,
            pixels: vec![background; width * height],
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The tone of an untouched pixel.
    pub fn background(&self) -> u8 {
        self.background
    }

    /// The tone of a painted pixel.
    pub fn foreground(&self) -> u8 {
        self.foreground
    }

    /// The intensity at column `x`, row `y`, if that is on the canvas.
    pub fn pixel(&self, x: usize, y: usize) -> Option<u8> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// The raw row-major buffer.
    pub fn as_raw(&self) -> &[u8] {
        &self.pixels
    }

    /// How many pixels have been painted.
    pub fn painted(&self) -> usize {
        self.pixels.iter().filter(|&&p| p == self.foreground).count()
    }

    /// True if nothing has been painted.
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|&p| p == self.background)
    }

    pub(crate) fn is_painted(&self, offset: usize) -> bool {
        self.pixels[offset] == self.foreground
    }

    pub(crate) fn paint(&mut self, offset: usize) {
        self.pixels[offset] = self.foreground;
    }

    /// Writes the canvas as an 8-bit grayscale image.  The format comes
    /// from the file extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        image::save_buffer(
            path,
            &self.pixels,
            self.width as u32,
            self.height as u32,
            ColorType::Gray(8),
        )
        .map_err(|e| Error::Image(e.to_string()))
    }
}
