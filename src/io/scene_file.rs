//! Whitespace-token scene format.
//!
//! ```text
//! e 0 0 5            # eye
//! l 0 0 0            # look-at point
//! u 0 1 0            # up
//! f 45               # vertical field of view, degrees
//! i 640 480          # image width and height
//! d 0.1 100          # near and far planes
//! L 5 5 5 1 1 1      # light: position, RGB intensity
//! M bunny.obj 0.1 0.1 0.1 0.8 0.2 0.2 1 1 1 32
//!                    # mesh: file, ambient, diffuse, specular, exponent
//! ```
//!
//! Anything after `#` on a line is ignored. Unknown tokens are skipped with a warning.

use crate::error::{Error, Result};
use crate::io::config::{Config, LightConfig, ObjectConfig};
use log::warn;
use std::str::FromStr;

struct Tokens<'a> {
    items: Vec<&'a str>,
    pos: usize,
}

impl<'a> Tokens<'a> {
    fn new(content: &'a str) -> Self {
        let items = content
            .lines()
            .map(|line| line.split('#').next().unwrap_or(""))
            .flat_map(str::split_whitespace)
            .collect();
        Self { items, pos: 0 }
    }

    fn next(&mut self) -> Option<&'a str> {
        let token = self.items.get(self.pos).copied();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn error(&self, message: String) -> Error {
        Error::SceneParse {
            token: self.pos,
            message,
        }
    }

    fn string(&mut self, what: &str) -> Result<&'a str> {
        self.next()
            .ok_or_else(|| self.error(format!("unexpected end of file, expected {what}")))
    }

    fn number<T: FromStr>(&mut self, what: &str) -> Result<T> {
        let token = self.string(what)?;
        token
            .parse()
            .map_err(|_| self.error(format!("expected {what}, found '{token}'")))
    }

    fn vec3(&mut self, what: &str) -> Result<[f32; 3]> {
        Ok([self.number(what)?, self.number(what)?, self.number(what)?])
    }
}

/// Parses the token format into a [`Config`] with default render options.
pub fn parse(content: &str) -> Result<Config> {
    let mut config = Config::default();
    let mut tokens = Tokens::new(content);

    while let Some(token) = tokens.next() {
        match token {
            "e" => config.camera.position = tokens.vec3("eye coordinate")?,
            "l" => config.camera.target = tokens.vec3("look-at coordinate")?,
            "u" => config.camera.up = tokens.vec3("up component")?,
            "f" => config.camera.fov = tokens.number("field of view")?,
            "i" => {
                config.camera.width = tokens.number("image width")?;
                config.camera.height = tokens.number("image height")?;
            }
            "d" => {
                config.camera.near = tokens.number("near plane")?;
                config.camera.far = tokens.number("far plane")?;
            }
            "L" => config.lights.push(LightConfig {
                position: tokens.vec3("light position")?,
                color: tokens.vec3("light intensity")?,
            }),
            "M" => {
                let mut object = ObjectConfig::new(tokens.string("mesh file name")?);
                object.ambient = tokens.vec3("ambient coefficient")?;
                object.diffuse = tokens.vec3("diffuse coefficient")?;
                object.specular = tokens.vec3("specular coefficient")?;
                object.shininess = tokens.number("specular exponent")?;
                config.objects.push(object);
            }
            other => warn!("Skipping unknown scene token '{}' at position {}", other, tokens.pos),
        }
    }

    Ok(config)
}
