use std::fmt;

use serde::Deserialize;

/// Identifier as it appears in snapshot JSON: either a string or an integer.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Int(i64),
    Text(String),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Int(value) => value.to_string(),
            RawId::Text(value) => value,
        }
    }
}

macro_rules! text_id {
    ($name:ident) => {
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
        #[serde(from = "RawId")]
        pub struct $name(String);

        #[cfg(test)]
        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }
        }

        impl From<RawId> for $name {
            fn from(raw: RawId) -> Self {
                Self(raw.into())
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value.to_string())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

text_id!(VertexId);
text_id!(LinkId);
text_id!(CommunityId);

/// Color with float channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "Rgba::opaque")]
    pub a: f32,
}

impl Rgba {
    fn opaque() -> f32 {
        1.0
    }
}

#[cfg(test)]
impl Rgba {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Vertex {
    pub id: VertexId,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub color: Rgba,
    pub community: CommunityId,
}

impl Vertex {
    pub fn position(&self) -> glam::Vec3 {
        glam::Vec3::new(self.x, self.y, self.z)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: LinkId,
    pub source: VertexId,
    pub target: VertexId,
    pub weight: f32,
    pub source_color: Rgba,
}

/// One complete graph frame. Vertices and links always travel together.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphSnapshot {
    #[serde(default)]
    pub vertices: Vec<Vertex>,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[cfg(test)]
impl GraphSnapshot {
    pub fn new(vertices: Vec<Vertex>, links: Vec<Link>) -> Self {
        Self { vertices, links }
    }
}

impl GraphSnapshot {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.links.is_empty()
    }

    pub fn community_count(&self) -> usize {
        let mut communities = self
            .vertices
            .iter()
            .map(|vertex| &vertex.community)
            .collect::<Vec<_>>();
        communities.sort();
        communities.dedup();
        communities.len()
    }
}
