//! The mesh data container.
//!
//! [`MeshData`] holds an optional index buffer and an optional vertex buffer
//! together with the [`MeshAttributeData`] descriptors explaining how to
//! read them. Buffers are either owned or borrowed (see
//! [`Buffer`](crate::buffer::Buffer)); all layout invariants are validated
//! once at [`MeshDataBuilder::build`] so accessors only need to check the
//! access itself (existence, element type, mutability).

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::buffer::{Buffer, StridedView, StridedViewMut};
use crate::error::MeshError;
use crate::math::{Vec2, Vec3, Vec4};

use super::attribute::{MeshAttributeData, MeshIndexData};
use super::format::{IndexFormat, IndexValue, VertexFormat, VertexFormatValue, VertexSemantic};

/// Primitive topology describing how vertices are assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrimitiveTopology {
    /// Each vertex is a separate point.
    PointList,
    /// Every two vertices form a line.
    LineList,
    /// Vertices form a connected strip of lines.
    LineStrip,
    /// Every three vertices form a triangle.
    #[default]
    TriangleList,
    /// Vertices form a connected strip of triangles.
    TriangleStrip,
}

impl PrimitiveTopology {
    /// Number of vertices per primitive (for non-strip topologies).
    pub fn vertices_per_primitive(&self) -> Option<u32> {
        match self {
            Self::PointList => Some(1),
            Self::LineList => Some(2),
            Self::TriangleList => Some(3),
            Self::LineStrip | Self::TriangleStrip => None,
        }
    }
}

/// Indexed or non-indexed mesh data with named, typed, strided attributes.
///
/// Move-only: copying would either duplicate large buffers or alias a
/// borrowed view with an ambiguous lifetime.
///
/// # Example
///
/// ```
/// use larkspur_trade::math::Vec2;
/// use larkspur_trade::mesh::{MeshAttributeData, MeshData, PrimitiveTopology, VertexSemantic};
///
/// let vertices = [Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0), Vec2::new(5.0, 6.0)];
/// let mesh = MeshData::builder(PrimitiveTopology::TriangleList)
///     .with_vertices(
///         bytemuck::cast_slice::<_, u8>(&vertices).to_vec(),
///         vec![MeshAttributeData::new::<Vec2>(VertexSemantic::Position, 0, 8, 3).unwrap()],
///     )
///     .build()
///     .unwrap();
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.positions_3d().unwrap()[1], larkspur_trade::math::Vec3::new(3.0, 4.0, 0.0));
/// ```
pub struct MeshData<'a> {
    primitive: PrimitiveTopology,
    index: Option<(Buffer<'a>, MeshIndexData)>,
    vertex_buffer: Option<Buffer<'a>>,
    attributes: Vec<MeshAttributeData>,
    vertex_count: usize,
    importer_state: Option<Arc<dyn Any + Send + Sync>>,
}

/// Builder for [`MeshData`]; validation happens in [`build`](Self::build).
pub struct MeshDataBuilder<'a> {
    primitive: PrimitiveTopology,
    index: Option<(Buffer<'a>, MeshIndexData)>,
    vertex: Option<(Buffer<'a>, Vec<MeshAttributeData>)>,
    vertex_count: Option<usize>,
    importer_state: Option<Arc<dyn Any + Send + Sync>>,
}

impl<'a> MeshDataBuilder<'a> {
    /// Set the index buffer and the typed view into it.
    #[must_use]
    pub fn with_indices(mut self, buffer: impl Into<Buffer<'a>>, view: MeshIndexData) -> Self {
        self.index = Some((buffer.into(), view));
        self
    }

    /// Set the vertex buffer and the attributes describing it.
    #[must_use]
    pub fn with_vertices(
        mut self,
        buffer: impl Into<Buffer<'a>>,
        attributes: Vec<MeshAttributeData>,
    ) -> Self {
        self.vertex = Some((buffer.into(), attributes));
        self
    }

    /// State the vertex count explicitly.
    ///
    /// Required for attribute-less meshes (shader-driven procedural
    /// drawing); otherwise it must agree with the attributes' element
    /// counts.
    #[must_use]
    pub fn with_vertex_count(mut self, count: usize) -> Self {
        self.vertex_count = Some(count);
        self
    }

    /// Attach an opaque importer state, passed through unmodified.
    #[must_use]
    pub fn with_importer_state(mut self, state: Arc<dyn Any + Send + Sync>) -> Self {
        self.importer_state = Some(state);
        self
    }

    /// Validate all layout invariants and produce the container.
    pub fn build(self) -> Result<MeshData<'a>, MeshError> {
        if let Some((buffer, view)) = &self.index {
            if view.count() == 0 {
                return Err(MeshError::NonIndexedWithIndexData);
            }
            if view.byte_end() > buffer.len() {
                return Err(MeshError::IndicesOutOfRange {
                    end: view.byte_end(),
                    len: buffer.len(),
                });
            }
        }

        let (vertex_buffer, attributes, vertex_count) = match self.vertex {
            Some((buffer, attributes)) => {
                if attributes.is_empty() && !buffer.is_empty() {
                    return Err(MeshError::AttributeLessWithVertexData {
                        data_len: buffer.len(),
                    });
                }
                let vertex_count = match attributes.first() {
                    Some(first) => {
                        let derived = first.count();
                        if let Some(stated) = self.vertex_count {
                            if stated != derived {
                                return Err(MeshError::InconsistentVertexCount {
                                    attribute: 0,
                                    count: derived,
                                    expected: stated,
                                });
                            }
                        }
                        derived
                    }
                    None => self.vertex_count.unwrap_or(0),
                };
                if vertex_count == 0 && !attributes.is_empty() && !buffer.is_empty() {
                    return Err(MeshError::ZeroVertexCountWithVertexData);
                }
                for (i, attribute) in attributes.iter().enumerate() {
                    if attribute.count() != vertex_count {
                        return Err(MeshError::InconsistentVertexCount {
                            attribute: i,
                            count: attribute.count(),
                            expected: vertex_count,
                        });
                    }
                    if attribute.byte_end() > buffer.len() {
                        return Err(MeshError::AttributeOutOfRange {
                            attribute: i,
                            end: attribute.byte_end(),
                            len: buffer.len(),
                        });
                    }
                }
                (Some(buffer), attributes, vertex_count)
            }
            None => (None, Vec::new(), self.vertex_count.unwrap_or(0)),
        };

        log::trace!(
            "built mesh: {} vertices, {} attributes, {} indices",
            vertex_count,
            attributes.len(),
            self.index.as_ref().map_or(0, |(_, view)| view.count())
        );

        Ok(MeshData {
            primitive: self.primitive,
            index: self.index,
            vertex_buffer,
            attributes,
            vertex_count,
            importer_state: self.importer_state,
        })
    }
}

impl<'a> MeshData<'a> {
    /// Start building a mesh with the given topology.
    pub fn builder(primitive: PrimitiveTopology) -> MeshDataBuilder<'a> {
        MeshDataBuilder {
            primitive,
            index: None,
            vertex: None,
            vertex_count: None,
            importer_state: None,
        }
    }

    /// Primitive topology.
    pub fn primitive(&self) -> PrimitiveTopology {
        self.primitive
    }

    /// Whether the mesh is indexed.
    pub fn is_indexed(&self) -> bool {
        self.index.is_some()
    }

    /// Index element format, `None` for non-indexed meshes.
    pub fn index_format(&self) -> Option<IndexFormat> {
        self.index.as_ref().map(|(_, view)| view.format())
    }

    /// Number of indices, zero for non-indexed meshes.
    pub fn index_count(&self) -> usize {
        self.index.as_ref().map_or(0, |(_, view)| view.count())
    }

    /// Byte offset of the index view inside the index buffer.
    pub fn index_offset(&self) -> usize {
        self.index.as_ref().map_or(0, |(_, view)| view.offset())
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Number of attributes.
    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    /// Number of attributes carrying the given semantic.
    pub fn attribute_count_of(&self, semantic: VertexSemantic) -> usize {
        self.attributes
            .iter()
            .filter(|a| a.semantic() == semantic)
            .count()
    }

    /// Raw bytes of the whole index buffer, `None` for non-indexed meshes.
    pub fn index_data(&self) -> Option<&[u8]> {
        self.index.as_ref().map(|(buffer, _)| buffer.as_slice())
    }

    /// Raw bytes of the vertex buffer, empty for attribute-less meshes.
    pub fn vertex_data(&self) -> &[u8] {
        self.vertex_buffer.as_ref().map_or(&[], |b| b.as_slice())
    }

    /// Whether the index buffer may be mutated.
    pub fn is_index_data_mutable(&self) -> bool {
        self.index.as_ref().is_some_and(|(buffer, _)| buffer.is_mutable())
    }

    /// Whether the vertex buffer may be mutated.
    pub fn is_vertex_data_mutable(&self) -> bool {
        self.vertex_buffer.as_ref().is_some_and(|b| b.is_mutable())
    }

    /// The opaque importer state, if any.
    pub fn importer_state(&self) -> Option<&Arc<dyn Any + Send + Sync>> {
        self.importer_state.as_ref()
    }

    /// Descriptor of the attribute with the given id.
    pub fn attribute_data(&self, id: usize) -> Result<&MeshAttributeData, MeshError> {
        self.attributes.get(id).ok_or(MeshError::IndexOutOfRange {
            index: id,
            count: self.attributes.len(),
        })
    }

    /// Semantic of the attribute with the given id.
    pub fn attribute_semantic(&self, id: usize) -> Result<VertexSemantic, MeshError> {
        self.attribute_data(id).map(|a| a.semantic())
    }

    /// Format of the attribute with the given id.
    pub fn attribute_format(&self, id: usize) -> Result<VertexFormat, MeshError> {
        self.attribute_data(id).map(|a| a.format())
    }

    /// Byte offset of the attribute relative to the vertex buffer start.
    pub fn attribute_offset(&self, id: usize) -> Result<usize, MeshError> {
        self.attribute_data(id).map(|a| a.offset())
    }

    /// Byte stride of the attribute with the given id.
    pub fn attribute_stride(&self, id: usize) -> Result<usize, MeshError> {
        self.attribute_data(id).map(|a| a.stride())
    }

    /// Id of the `occurrence`-th attribute with the given semantic, in
    /// declaration order.
    pub fn find_attribute(
        &self,
        semantic: VertexSemantic,
        occurrence: usize,
    ) -> Result<usize, MeshError> {
        self.attributes
            .iter()
            .enumerate()
            .filter(|(_, a)| a.semantic() == semantic)
            .map(|(i, _)| i)
            .nth(occurrence)
            .ok_or_else(|| MeshError::AttributeNotFound {
                semantic,
                occurrence,
                count: self.attribute_count_of(semantic),
            })
    }

    /// Typed read-only view of the indices.
    ///
    /// The view aliases the container's storage; nothing is copied.
    pub fn indices<T: IndexValue>(&self) -> Result<StridedView<'_, T>, MeshError> {
        let (buffer, view) = self.index.as_ref().ok_or(MeshError::NotIndexed)?;
        if view.format() != T::FORMAT {
            return Err(MeshError::IndexTypeMismatch {
                expected: view.format(),
                got: T::FORMAT,
            });
        }
        let bytes = &buffer.as_slice()[view.offset()..view.byte_end()];
        Ok(StridedView::new(bytes, view.format().size(), view.count()))
    }

    /// Typed mutable view of the indices.
    ///
    /// Fails with [`MeshError::NotMutable`] when the index buffer is a
    /// read-only borrow.
    pub fn indices_mut<T: IndexValue>(&mut self) -> Result<StridedViewMut<'_, T>, MeshError> {
        let (buffer, view) = self.index.as_mut().ok_or(MeshError::NotIndexed)?;
        if view.format() != T::FORMAT {
            return Err(MeshError::IndexTypeMismatch {
                expected: view.format(),
                got: T::FORMAT,
            });
        }
        let (offset, end, stride, count) =
            (view.offset(), view.byte_end(), view.format().size(), view.count());
        let bytes = buffer.as_mut_slice().ok_or(MeshError::NotMutable)?;
        Ok(StridedViewMut::new(&mut bytes[offset..end], stride, count))
    }

    /// Typed read-only view of the attribute with the given id.
    ///
    /// `T`'s format tag must equal the stored one; the view aliases the
    /// container's storage.
    pub fn attribute<T: VertexFormatValue>(&self, id: usize) -> Result<StridedView<'_, T>, MeshError> {
        let attribute = *self.attribute_data(id)?;
        if attribute.format() != T::FORMAT {
            return Err(MeshError::TypeMismatch {
                expected: attribute.format(),
                got: T::FORMAT,
            });
        }
        let data = self.vertex_data();
        let bytes = &data[attribute.offset()..attribute.byte_end()];
        Ok(StridedView::new(bytes, attribute.stride(), attribute.count()))
    }

    /// Typed mutable view of the attribute with the given id.
    pub fn attribute_mut<T: VertexFormatValue>(
        &mut self,
        id: usize,
    ) -> Result<StridedViewMut<'_, T>, MeshError> {
        let attribute = *self.attribute_data(id)?;
        if attribute.format() != T::FORMAT {
            return Err(MeshError::TypeMismatch {
                expected: attribute.format(),
                got: T::FORMAT,
            });
        }
        let buffer = self.vertex_buffer.as_mut().ok_or(MeshError::NotMutable)?;
        let bytes = buffer.as_mut_slice().ok_or(MeshError::NotMutable)?;
        Ok(StridedViewMut::new(
            &mut bytes[attribute.offset()..attribute.byte_end()],
            attribute.stride(),
            attribute.count(),
        ))
    }

    /// Typed view of the `occurrence`-th attribute with the given semantic.
    pub fn attribute_by_name<T: VertexFormatValue>(
        &self,
        semantic: VertexSemantic,
        occurrence: usize,
    ) -> Result<StridedView<'_, T>, MeshError> {
        let id = self.find_attribute(semantic, occurrence)?;
        self.attribute(id)
    }

    /// Mutable counterpart of [`attribute_by_name`](Self::attribute_by_name).
    pub fn attribute_by_name_mut<T: VertexFormatValue>(
        &mut self,
        semantic: VertexSemantic,
        occurrence: usize,
    ) -> Result<StridedViewMut<'_, T>, MeshError> {
        let id = self.find_attribute(semantic, occurrence)?;
        self.attribute_mut(id)
    }

    /// Positions converted to 2D, dropping Z of 3D positions.
    pub fn positions_2d(&self) -> Result<Vec<Vec2>, MeshError> {
        let mut out = vec![Vec2::zeros(); self.vertex_count];
        self.positions_2d_into(&mut out)?;
        Ok(out)
    }

    /// [`positions_2d`](Self::positions_2d) into a preallocated slice.
    ///
    /// The destination length must equal [`vertex_count`](Self::vertex_count).
    pub fn positions_2d_into(&self, destination: &mut [Vec2]) -> Result<(), MeshError> {
        let id = self.find_attribute(VertexSemantic::Position, 0)?;
        self.check_destination(destination.len())?;
        match self.attribute_format(id)? {
            VertexFormat::Vector2 => {
                for (out, v) in destination.iter_mut().zip(self.attribute::<Vec2>(id)?.iter()) {
                    *out = v;
                }
            }
            VertexFormat::Vector3 => {
                for (out, v) in destination.iter_mut().zip(self.attribute::<Vec3>(id)?.iter()) {
                    *out = v.xy();
                }
            }
            other => {
                return Err(MeshError::TypeMismatch {
                    expected: other,
                    got: VertexFormat::Vector2,
                })
            }
        }
        Ok(())
    }

    /// Positions converted to 3D, appending zero Z to 2D positions.
    pub fn positions_3d(&self) -> Result<Vec<Vec3>, MeshError> {
        let mut out = vec![Vec3::zeros(); self.vertex_count];
        self.positions_3d_into(&mut out)?;
        Ok(out)
    }

    /// [`positions_3d`](Self::positions_3d) into a preallocated slice.
    pub fn positions_3d_into(&self, destination: &mut [Vec3]) -> Result<(), MeshError> {
        let id = self.find_attribute(VertexSemantic::Position, 0)?;
        self.check_destination(destination.len())?;
        match self.attribute_format(id)? {
            VertexFormat::Vector2 => {
                for (out, v) in destination.iter_mut().zip(self.attribute::<Vec2>(id)?.iter()) {
                    *out = Vec3::new(v.x, v.y, 0.0);
                }
            }
            VertexFormat::Vector3 => {
                for (out, v) in destination.iter_mut().zip(self.attribute::<Vec3>(id)?.iter()) {
                    *out = v;
                }
            }
            other => {
                return Err(MeshError::TypeMismatch {
                    expected: other,
                    got: VertexFormat::Vector3,
                })
            }
        }
        Ok(())
    }

    /// Normals as 3D vectors.
    pub fn normals(&self) -> Result<Vec<Vec3>, MeshError> {
        let mut out = vec![Vec3::zeros(); self.vertex_count];
        self.normals_into(&mut out)?;
        Ok(out)
    }

    /// [`normals`](Self::normals) into a preallocated slice.
    pub fn normals_into(&self, destination: &mut [Vec3]) -> Result<(), MeshError> {
        let id = self.find_attribute(VertexSemantic::Normal, 0)?;
        self.check_destination(destination.len())?;
        for (out, v) in destination.iter_mut().zip(self.attribute::<Vec3>(id)?.iter()) {
            *out = v;
        }
        Ok(())
    }

    /// Texture coordinates as 2D vectors.
    pub fn texture_coordinates_2d(&self) -> Result<Vec<Vec2>, MeshError> {
        let mut out = vec![Vec2::zeros(); self.vertex_count];
        self.texture_coordinates_2d_into(&mut out)?;
        Ok(out)
    }

    /// [`texture_coordinates_2d`](Self::texture_coordinates_2d) into a
    /// preallocated slice.
    pub fn texture_coordinates_2d_into(&self, destination: &mut [Vec2]) -> Result<(), MeshError> {
        let id = self.find_attribute(VertexSemantic::TextureCoordinates, 0)?;
        self.check_destination(destination.len())?;
        for (out, v) in destination.iter_mut().zip(self.attribute::<Vec2>(id)?.iter()) {
            *out = v;
        }
        Ok(())
    }

    /// Colors converted to RGBA, defaulting alpha of RGB colors to 1.0.
    pub fn colors(&self) -> Result<Vec<Vec4>, MeshError> {
        let mut out = vec![Vec4::zeros(); self.vertex_count];
        self.colors_into(&mut out)?;
        Ok(out)
    }

    /// [`colors`](Self::colors) into a preallocated slice.
    pub fn colors_into(&self, destination: &mut [Vec4]) -> Result<(), MeshError> {
        let id = self.find_attribute(VertexSemantic::Color, 0)?;
        self.check_destination(destination.len())?;
        match self.attribute_format(id)? {
            VertexFormat::Vector3 => {
                for (out, v) in destination.iter_mut().zip(self.attribute::<Vec3>(id)?.iter()) {
                    *out = Vec4::new(v.x, v.y, v.z, 1.0);
                }
            }
            VertexFormat::Vector4 => {
                for (out, v) in destination.iter_mut().zip(self.attribute::<Vec4>(id)?.iter()) {
                    *out = v;
                }
            }
            other => {
                return Err(MeshError::TypeMismatch {
                    expected: other,
                    got: VertexFormat::Vector4,
                })
            }
        }
        Ok(())
    }

    /// Transfer the index buffer to the caller.
    ///
    /// Returns the owned vector or the tagged borrowed view; the mesh is
    /// non-indexed afterwards. `None` when the mesh was not indexed.
    pub fn release_index_data(&mut self) -> Option<Buffer<'a>> {
        let (buffer, _) = self.index.take()?;
        log::trace!("released index data ({} bytes)", buffer.len());
        Some(buffer)
    }

    /// Transfer the vertex buffer to the caller.
    ///
    /// The mesh is attribute-less afterwards; the vertex count is kept so a
    /// procedural consumer can still draw. `None` when there was no vertex
    /// buffer.
    pub fn release_vertex_data(&mut self) -> Option<Buffer<'a>> {
        self.attributes.clear();
        let buffer = self.vertex_buffer.take()?;
        log::trace!("released vertex data ({} bytes)", buffer.len());
        Some(buffer)
    }

    fn check_destination(&self, len: usize) -> Result<(), MeshError> {
        if len != self.vertex_count {
            return Err(MeshError::SizeMismatch {
                expected: self.vertex_count,
                got: len,
            });
        }
        Ok(())
    }
}

impl fmt::Debug for MeshData<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeshData")
            .field("primitive", &self.primitive)
            .field("vertex_count", &self.vertex_count)
            .field("attribute_count", &self.attributes.len())
            .field("index_count", &self.index_count())
            .field("index_format", &self.index_format())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytemuck::{Pod, Zeroable};

    fn position_attr_2d(count: usize) -> MeshAttributeData {
        MeshAttributeData::new::<Vec2>(VertexSemantic::Position, 0, 8, count).unwrap()
    }

    #[test]
    fn test_primitive_topology_vertices() {
        assert_eq!(PrimitiveTopology::PointList.vertices_per_primitive(), Some(1));
        assert_eq!(PrimitiveTopology::LineList.vertices_per_primitive(), Some(2));
        assert_eq!(PrimitiveTopology::TriangleList.vertices_per_primitive(), Some(3));
        assert_eq!(PrimitiveTopology::TriangleStrip.vertices_per_primitive(), None);
    }

    #[test]
    fn positions_2d_and_3d_conversion() {
        // Three 2D positions; 2D read returns them as-is, 3D read appends z=0
        let vertices = [Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0), Vec2::new(5.0, 6.0)];
        let mesh = MeshData::builder(PrimitiveTopology::TriangleList)
            .with_vertices(
                bytemuck::cast_slice::<_, u8>(&vertices).to_vec(),
                vec![position_attr_2d(3)],
            )
            .build()
            .unwrap();

        assert_eq!(mesh.positions_2d().unwrap(), vertices.to_vec());
        assert_eq!(
            mesh.positions_3d().unwrap(),
            vec![
                Vec3::new(1.0, 2.0, 0.0),
                Vec3::new(3.0, 4.0, 0.0),
                Vec3::new(5.0, 6.0, 0.0),
            ]
        );
    }

    #[test]
    fn positions_2d_drops_z() {
        let vertices = [Vec3::new(1.0, 2.0, 9.0), Vec3::new(3.0, 4.0, 9.0)];
        let mesh = MeshData::builder(PrimitiveTopology::LineList)
            .with_vertices(
                bytemuck::cast_slice::<_, u8>(&vertices).to_vec(),
                vec![MeshAttributeData::new::<Vec3>(VertexSemantic::Position, 0, 12, 2).unwrap()],
            )
            .build()
            .unwrap();
        assert_eq!(
            mesh.positions_2d().unwrap(),
            vec![Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0)]
        );
    }

    #[test]
    fn borrowed_round_trip_aliases_input() {
        let vertices = [Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0), Vec2::new(5.0, 6.0)];
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        let mesh = MeshData::builder(PrimitiveTopology::TriangleList)
            .with_vertices(bytes, vec![position_attr_2d(3)])
            .build()
            .unwrap();

        assert_eq!(mesh.attribute_semantic(0).unwrap(), VertexSemantic::Position);
        assert_eq!(mesh.attribute_format(0).unwrap(), VertexFormat::Vector2);
        assert_eq!(mesh.attribute_offset(0).unwrap(), 0);
        assert_eq!(mesh.attribute_stride(0).unwrap(), 8);

        // The typed view aliases the caller's memory, it is not a copy
        let view = mesh.attribute::<Vec2>(0).unwrap();
        assert_eq!(view.as_bytes().as_ptr(), bytes.as_ptr());
        assert_eq!(view.to_vec(), vertices.to_vec());
        assert_eq!(mesh.vertex_data().as_ptr(), bytes.as_ptr());
    }

    #[test]
    fn indexed_mesh_round_trip() {
        let vertices = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)];
        let indices: [u16; 3] = [0, 1, 2];
        let mesh = MeshData::builder(PrimitiveTopology::TriangleList)
            .with_indices(
                bytemuck::cast_slice::<_, u8>(&indices).to_vec(),
                MeshIndexData::new(IndexFormat::Uint16, 0, 3),
            )
            .with_vertices(
                bytemuck::cast_slice::<_, u8>(&vertices).to_vec(),
                vec![position_attr_2d(3)],
            )
            .build()
            .unwrap();

        assert!(mesh.is_indexed());
        assert_eq!(mesh.index_format(), Some(IndexFormat::Uint16));
        assert_eq!(mesh.index_count(), 3);
        assert_eq!(mesh.indices::<u16>().unwrap().to_vec(), vec![0, 1, 2]);
    }

    #[test]
    fn index_type_mismatch_guard() {
        let indices: [u16; 3] = [0, 1, 2];
        let mesh = MeshData::builder(PrimitiveTopology::TriangleList)
            .with_indices(
                bytemuck::cast_slice::<_, u8>(&indices).to_vec(),
                MeshIndexData::new(IndexFormat::Uint16, 0, 3),
            )
            .with_vertex_count(3)
            .build()
            .unwrap();
        assert_eq!(
            mesh.indices::<u32>().unwrap_err(),
            MeshError::IndexTypeMismatch {
                expected: IndexFormat::Uint16,
                got: IndexFormat::Uint32,
            }
        );
    }

    #[test]
    fn attribute_type_mismatch_guard() {
        let vertices = [Vec2::new(0.0, 0.0); 3];
        let mesh = MeshData::builder(PrimitiveTopology::TriangleList)
            .with_vertices(
                bytemuck::cast_slice::<_, u8>(&vertices).to_vec(),
                vec![position_attr_2d(3)],
            )
            .build()
            .unwrap();
        // Every format other than the stored one has to be rejected
        assert_eq!(
            mesh.attribute::<Vec3>(0).unwrap_err(),
            MeshError::TypeMismatch {
                expected: VertexFormat::Vector2,
                got: VertexFormat::Vector3,
            }
        );
        assert_eq!(
            mesh.attribute::<f32>(0).unwrap_err(),
            MeshError::TypeMismatch {
                expected: VertexFormat::Vector2,
                got: VertexFormat::Float,
            }
        );
    }

    #[test]
    fn not_indexed_access() {
        let mesh = MeshData::builder(PrimitiveTopology::PointList)
            .with_vertex_count(4)
            .build()
            .unwrap();
        assert!(!mesh.is_indexed());
        assert_eq!(mesh.indices::<u16>().unwrap_err(), MeshError::NotIndexed);
    }

    #[test]
    fn attribute_less_explicit_vertex_count() {
        // Shader-driven procedural drawing: no buffers at all
        let mesh = MeshData::builder(PrimitiveTopology::TriangleStrip)
            .with_vertex_count(14)
            .build()
            .unwrap();
        assert_eq!(mesh.vertex_count(), 14);
        assert_eq!(mesh.attribute_count(), 0);
        assert!(mesh.vertex_data().is_empty());
    }

    #[test]
    fn vertex_data_without_attributes_rejected() {
        let result = MeshData::builder(PrimitiveTopology::TriangleList)
            .with_vertices(vec![0u8; 24], vec![])
            .build();
        assert_eq!(
            result.unwrap_err(),
            MeshError::AttributeLessWithVertexData { data_len: 24 }
        );
    }

    #[test]
    fn zero_vertex_count_with_vertex_data_rejected() {
        let result = MeshData::builder(PrimitiveTopology::TriangleList)
            .with_vertices(vec![0u8; 24], vec![position_attr_2d(0)])
            .build();
        assert_eq!(result.unwrap_err(), MeshError::ZeroVertexCountWithVertexData);
    }

    #[test]
    fn empty_index_view_with_data_rejected() {
        let result = MeshData::builder(PrimitiveTopology::TriangleList)
            .with_indices(vec![0u8; 6], MeshIndexData::new(IndexFormat::Uint16, 0, 0))
            .with_vertex_count(3)
            .build();
        assert_eq!(result.unwrap_err(), MeshError::NonIndexedWithIndexData);
    }

    #[test]
    fn index_view_out_of_range_rejected() {
        let result = MeshData::builder(PrimitiveTopology::TriangleList)
            .with_indices(vec![0u8; 4], MeshIndexData::new(IndexFormat::Uint16, 0, 3))
            .with_vertex_count(3)
            .build();
        assert_eq!(result.unwrap_err(), MeshError::IndicesOutOfRange { end: 6, len: 4 });
    }

    #[test]
    fn attribute_out_of_range_rejected() {
        let result = MeshData::builder(PrimitiveTopology::TriangleList)
            .with_vertices(vec![0u8; 16], vec![position_attr_2d(3)])
            .build();
        assert_eq!(
            result.unwrap_err(),
            MeshError::AttributeOutOfRange {
                attribute: 0,
                end: 24,
                len: 16,
            }
        );
    }

    #[test]
    fn overflowing_attribute_range_rejected() {
        // Offset near usize::MAX must not wrap past the length check
        let result = MeshData::builder(PrimitiveTopology::TriangleList)
            .with_vertices(
                vec![0u8; 24],
                vec![
                    MeshAttributeData::new::<Vec2>(VertexSemantic::Position, usize::MAX, 8, 3)
                        .unwrap(),
                ],
            )
            .build();
        assert_eq!(
            result.unwrap_err(),
            MeshError::AttributeOutOfRange {
                attribute: 0,
                end: usize::MAX,
                len: 24,
            }
        );

        let result = MeshData::builder(PrimitiveTopology::TriangleList)
            .with_indices(
                vec![0u8; 12],
                MeshIndexData::new(IndexFormat::Uint32, usize::MAX, 3),
            )
            .with_vertex_count(3)
            .build();
        assert_eq!(
            result.unwrap_err(),
            MeshError::IndicesOutOfRange {
                end: usize::MAX,
                len: 12,
            }
        );
    }

    #[test]
    fn inconsistent_vertex_count_rejected() {
        let result = MeshData::builder(PrimitiveTopology::TriangleList)
            .with_vertices(
                vec![0u8; 64],
                vec![
                    position_attr_2d(3),
                    MeshAttributeData::new::<Vec2>(VertexSemantic::TextureCoordinates, 24, 8, 4)
                        .unwrap(),
                ],
            )
            .build();
        assert_eq!(
            result.unwrap_err(),
            MeshError::InconsistentVertexCount {
                attribute: 1,
                count: 4,
                expected: 3,
            }
        );
    }

    #[test]
    fn explicit_count_must_match_attributes() {
        let result = MeshData::builder(PrimitiveTopology::TriangleList)
            .with_vertices(vec![0u8; 24], vec![position_attr_2d(3)])
            .with_vertex_count(5)
            .build();
        assert_eq!(
            result.unwrap_err(),
            MeshError::InconsistentVertexCount {
                attribute: 0,
                count: 3,
                expected: 5,
            }
        );
    }

    #[test]
    fn name_qualified_occurrence_lookup() {
        // Two texture coordinate sets, selected in declaration order
        let mesh = MeshData::builder(PrimitiveTopology::TriangleList)
            .with_vertices(
                vec![0u8; 48],
                vec![
                    MeshAttributeData::new::<Vec2>(VertexSemantic::TextureCoordinates, 0, 8, 3)
                        .unwrap(),
                    MeshAttributeData::new::<Vec2>(VertexSemantic::TextureCoordinates, 24, 8, 3)
                        .unwrap(),
                ],
            )
            .build()
            .unwrap();

        assert_eq!(mesh.find_attribute(VertexSemantic::TextureCoordinates, 0).unwrap(), 0);
        assert_eq!(mesh.find_attribute(VertexSemantic::TextureCoordinates, 1).unwrap(), 1);
        assert_eq!(
            mesh.find_attribute(VertexSemantic::TextureCoordinates, 2).unwrap_err(),
            MeshError::AttributeNotFound {
                semantic: VertexSemantic::TextureCoordinates,
                occurrence: 2,
                count: 2,
            }
        );
    }

    #[derive(Clone, Copy, Pod, Zeroable)]
    #[repr(C)]
    struct Vertex {
        position: [f32; 3],
        normal: [f32; 3],
    }

    #[test]
    fn interleaved_layout_access() {
        let vertices = [
            Vertex {
                position: [1.0, 2.0, 3.0],
                normal: [0.0, 0.0, 1.0],
            },
            Vertex {
                position: [4.0, 5.0, 6.0],
                normal: [0.0, 1.0, 0.0],
            },
        ];
        let mesh = MeshData::builder(PrimitiveTopology::LineList)
            .with_vertices(
                bytemuck::cast_slice::<_, u8>(&vertices).to_vec(),
                vec![
                    MeshAttributeData::new::<Vec3>(VertexSemantic::Position, 0, 24, 2).unwrap(),
                    MeshAttributeData::new::<Vec3>(VertexSemantic::Normal, 12, 24, 2).unwrap(),
                ],
            )
            .build()
            .unwrap();

        assert_eq!(
            mesh.positions_3d().unwrap(),
            vec![Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0)]
        );
        assert_eq!(
            mesh.normals().unwrap(),
            vec![Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 1.0, 0.0)]
        );
    }

    #[test]
    fn colors_default_alpha() {
        let colors = [Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)];
        let mesh = MeshData::builder(PrimitiveTopology::PointList)
            .with_vertices(
                bytemuck::cast_slice::<_, u8>(&colors).to_vec(),
                vec![MeshAttributeData::new::<Vec3>(VertexSemantic::Color, 0, 12, 2).unwrap()],
            )
            .build()
            .unwrap();
        assert_eq!(
            mesh.colors().unwrap(),
            vec![Vec4::new(1.0, 0.0, 0.0, 1.0), Vec4::new(0.0, 1.0, 0.0, 1.0)]
        );
    }

    #[test]
    fn conversion_into_size_mismatch() {
        let vertices = [Vec2::new(0.0, 0.0); 3];
        let mesh = MeshData::builder(PrimitiveTopology::TriangleList)
            .with_vertices(
                bytemuck::cast_slice::<_, u8>(&vertices).to_vec(),
                vec![position_attr_2d(3)],
            )
            .build()
            .unwrap();
        let mut destination = vec![Vec2::zeros(); 2];
        assert_eq!(
            mesh.positions_2d_into(&mut destination).unwrap_err(),
            MeshError::SizeMismatch { expected: 3, got: 2 }
        );
    }

    #[test]
    fn mutable_access_guard() {
        let vertices = [Vec2::new(0.0, 0.0); 3];
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        // Read-only borrow: mutation is refused
        let mut mesh = MeshData::builder(PrimitiveTopology::TriangleList)
            .with_vertices(bytes, vec![position_attr_2d(3)])
            .build()
            .unwrap();
        assert!(!mesh.is_vertex_data_mutable());
        assert_eq!(mesh.attribute_mut::<Vec2>(0).unwrap_err(), MeshError::NotMutable);
    }

    #[test]
    fn mutable_borrow_writes_through() {
        let mut vertices = [Vec2::new(0.0, 0.0); 3];
        {
            let bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut vertices);
            let mut mesh = MeshData::builder(PrimitiveTopology::TriangleList)
                .with_vertices(bytes, vec![position_attr_2d(3)])
                .build()
                .unwrap();
            assert!(mesh.is_vertex_data_mutable());
            let mut view = mesh.attribute_mut::<Vec2>(0).unwrap();
            view.set(1, Vec2::new(7.0, 8.0));
        }
        assert_eq!(vertices[1], Vec2::new(7.0, 8.0));
    }

    #[test]
    fn release_vertex_data_resets_attributes() {
        let vertices = [Vec2::new(1.0, 2.0); 3];
        let data = bytemuck::cast_slice::<_, u8>(&vertices).to_vec();
        let original_ptr = data.as_ptr();
        let mut mesh = MeshData::builder(PrimitiveTopology::TriangleList)
            .with_vertices(data, vec![position_attr_2d(3)])
            .build()
            .unwrap();

        let released = mesh.release_vertex_data().unwrap();
        assert!(released.is_owned());
        // Owned data keeps its allocation through the release
        assert_eq!(released.as_slice().as_ptr(), original_ptr);
        assert_eq!(mesh.attribute_count(), 0);
        assert!(mesh.vertex_data().is_empty());
        assert_eq!(mesh.vertex_count(), 3);
        assert!(mesh.release_vertex_data().is_none());
    }

    #[test]
    fn release_index_data_resets_to_non_indexed() {
        let indices: [u16; 3] = [0, 1, 2];
        let mut mesh = MeshData::builder(PrimitiveTopology::TriangleList)
            .with_indices(
                bytemuck::cast_slice::<_, u8>(&indices).to_vec(),
                MeshIndexData::new(IndexFormat::Uint16, 0, 3),
            )
            .with_vertex_count(3)
            .build()
            .unwrap();

        let released = mesh.release_index_data().unwrap();
        assert_eq!(released.len(), 6);
        assert!(!mesh.is_indexed());
        assert_eq!(mesh.index_count(), 0);
        assert_eq!(mesh.index_format(), None);
    }

    #[test]
    fn release_borrowed_hands_back_view() {
        let vertices = [Vec2::new(1.0, 2.0); 3];
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        let mut mesh = MeshData::builder(PrimitiveTopology::TriangleList)
            .with_vertices(bytes, vec![position_attr_2d(3)])
            .build()
            .unwrap();
        let released = mesh.release_vertex_data().unwrap();
        assert!(!released.is_owned());
        assert_eq!(released.as_slice().as_ptr(), bytes.as_ptr());
    }

    #[test]
    fn importer_state_passthrough() {
        let state: Arc<dyn Any + Send + Sync> = Arc::new(42u32);
        let mesh = MeshData::builder(PrimitiveTopology::PointList)
            .with_vertex_count(1)
            .with_importer_state(Arc::clone(&state))
            .build()
            .unwrap();
        let stored = mesh.importer_state().unwrap();
        assert_eq!(stored.downcast_ref::<u32>(), Some(&42));
    }

    #[test]
    fn indices_mut_writes_through() {
        let indices: [u32; 3] = [0, 1, 2];
        let mut mesh = MeshData::builder(PrimitiveTopology::TriangleList)
            .with_indices(
                bytemuck::cast_slice::<_, u8>(&indices).to_vec(),
                MeshIndexData::new(IndexFormat::Uint32, 0, 3),
            )
            .with_vertex_count(3)
            .build()
            .unwrap();
        mesh.indices_mut::<u32>().unwrap().set(0, 9);
        assert_eq!(mesh.indices::<u32>().unwrap().to_vec(), vec![9, 1, 2]);
    }
}
