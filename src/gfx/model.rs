//! The showcase model: OBJ loading, GPU buffers and draw helpers

use std::ops::Range;
use std::path::Path;

use cgmath::{InnerSpace, Matrix4, Vector3, Zero};
use log::{debug, info};
use wgpu::util::DeviceExt;

use super::vertex::Vertex3D;
use crate::error::{Result, VitrineError};
use crate::wgpu_utils::{single_resource_group, UniformBuffer};

const DEFAULT_DIFFUSE: [f32; 3] = [0.8, 0.8, 0.8];

pub struct Mesh {
    vertices: Vec<Vertex3D>,
    indices: Vec<u32>,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    index_count: u32,
}

impl Mesh {
    /// Builds a mesh from flat position/normal arrays; all vertices share `color`
    pub fn new(positions: &[f32], normals: &[f32], indices: Vec<u32>, color: [f32; 3]) -> Self {
        let vertices = positions
            .chunks_exact(3)
            .zip(normals.chunks_exact(3))
            .map(|(p, n)| Vertex3D {
                position: [p[0], p[1], p[2]],
                normal: [n[0], n[1], n[2]],
                color,
            })
            .collect();

        Self {
            index_count: indices.len() as u32,
            vertices,
            indices,
            vertex_buffer: None,
            index_buffer: None,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Averages adjacent face normals per vertex, for OBJ files without normals
    pub fn calculate_vertex_normals(positions: &[f32], indices: &[u32]) -> Vec<f32> {
        let vertex = |i: u32| {
            let i = i as usize * 3;
            Vector3::new(positions[i], positions[i + 1], positions[i + 2])
        };
        let mut accumulated = vec![Vector3::zero(); positions.len() / 3];

        for triangle in indices.chunks_exact(3) {
            let (v0, v1, v2) = (vertex(triangle[0]), vertex(triangle[1]), vertex(triangle[2]));
            let face_normal = (v1 - v0).cross(v2 - v0);
            for &index in triangle {
                accumulated[index as usize] += face_normal;
            }
        }

        accumulated
            .into_iter()
            .flat_map(|normal: Vector3<f32>| {
                let normal = if normal.magnitude2() > 0.0 {
                    normal.normalize()
                } else {
                    normal
                };
                [normal.x, normal.y, normal.z]
            })
            .collect()
    }

    fn init_gpu_resources(&mut self, device: &wgpu::Device) {
        self.vertex_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(&self.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.index_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer"),
            contents: bytemuck::cast_slice(&self.indices),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniform {
    pub model: [[f32; 4]; 4],
}

struct ModelGpuResources {
    transform: UniformBuffer<ModelUniform>,
    bind_group: wgpu::BindGroup,
}

/// The loaded model; its pose lives in [`Stage`](crate::stage::Stage)
pub struct Model {
    pub name: String,
    pub meshes: Vec<Mesh>,
    gpu_resources: Option<ModelGpuResources>,
}

impl Model {
    pub fn new(name: impl Into<String>, meshes: Vec<Mesh>) -> Self {
        Self {
            name: name.into(),
            meshes,
            gpu_resources: None,
        }
    }

    /// Loads an OBJ file (and its MTL, when present) from `path`
    pub fn load(path: &Path) -> Result<Self> {
        let (models, materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
        )
        .map_err(|source| VitrineError::ModelLoad {
            path: path.to_path_buf(),
            source,
        })?;

        if models.is_empty() {
            return Err(VitrineError::EmptyModel(path.to_path_buf()));
        }

        let materials = materials.unwrap_or_else(|err| {
            debug!("no materials for {}: {err}", path.display());
            Vec::new()
        });

        let meshes: Vec<Mesh> = models
            .iter()
            .map(|model| {
                let mesh = &model.mesh;
                let color = mesh
                    .material_id
                    .and_then(|id| materials.get(id))
                    .and_then(|material| material.diffuse)
                    .unwrap_or(DEFAULT_DIFFUSE);

                let normals = if mesh.normals.len() == mesh.positions.len() {
                    mesh.normals.clone()
                } else {
                    Mesh::calculate_vertex_normals(&mesh.positions, &mesh.indices)
                };

                Mesh::new(&mesh.positions, &normals, mesh.indices.clone(), color)
            })
            .collect();

        let name = models
            .iter()
            .map(|model| model.name.as_str())
            .find(|name| !name.is_empty())
            .unwrap_or("model")
            .to_string();

        let triangles: usize = meshes.iter().map(Mesh::triangle_count).sum();
        info!(
            "loaded {} ({} meshes, {} triangles) from {}",
            name,
            meshes.len(),
            triangles,
            path.display()
        );

        Ok(Self::new(name, meshes))
    }

    /// Uploads mesh buffers and creates the transform uniform
    pub fn init_gpu_resources(&mut self, device: &wgpu::Device, layout: &wgpu::BindGroupLayout) {
        for mesh in &mut self.meshes {
            mesh.init_gpu_resources(device);
        }

        let transform = UniformBuffer::new(
            device,
            &ModelUniform {
                model: Matrix4::from_scale(1.0).into(),
            },
        );
        let bind_group = single_resource_group(
            device,
            layout,
            transform.binding_resource(),
            "Model Transform Bind Group",
        );

        self.gpu_resources = Some(ModelGpuResources {
            transform,
            bind_group,
        });
    }

    pub fn update_transform(&mut self, queue: &wgpu::Queue, transform: Matrix4<f32>) {
        if let Some(gpu_resources) = self.gpu_resources.as_mut() {
            gpu_resources.transform.update_content(
                queue,
                ModelUniform {
                    model: transform.into(),
                },
            );
        }
    }

    pub fn transform_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu_resources.as_ref().map(|res| &res.bind_group)
    }
}

pub trait DrawModel<'a> {
    fn draw_mesh_instanced(&mut self, mesh: &'a Mesh, instances: Range<u32>);
    fn draw_model(&mut self, model: &'a Model, transform_group: u32);
}

impl<'a, 'b> DrawModel<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh_instanced(&mut self, mesh: &'b Mesh, instances: Range<u32>) {
        let (Some(vertex_buffer), Some(index_buffer)) = (&mesh.vertex_buffer, &mesh.index_buffer)
        else {
            return;
        };

        self.set_vertex_buffer(0, vertex_buffer.slice(..));
        self.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.index_count, 0, instances);
    }

    fn draw_model(&mut self, model: &'b Model, transform_group: u32) {
        let Some(bind_group) = model.transform_bind_group() else {
            return;
        };
        self.set_bind_group(transform_group, bind_group, &[]);
        for mesh in &model.meshes {
            self.draw_mesh_instanced(mesh, 0..1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_normals_of_flat_quad() {
        let positions = [
            0.0, 0.0, 0.0, //
            1.0, 0.0, 0.0, //
            1.0, 1.0, 0.0, //
            0.0, 1.0, 0.0,
        ];
        let indices = [0, 1, 2, 0, 2, 3];
        let normals = Mesh::calculate_vertex_normals(&positions, &indices);

        assert_eq!(normals.len(), positions.len());
        for normal in normals.chunks_exact(3) {
            assert_eq!(normal, &[0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn test_unreferenced_vertex_keeps_zero_normal() {
        let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 5.0, 5.0, 5.0];
        let normals = Mesh::calculate_vertex_normals(&positions, &[0, 1, 2]);
        assert_eq!(&normals[9..], &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_mesh_counts() {
        let mesh = Mesh::new(
            &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            &[0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
            vec![0, 1, 2],
            DEFAULT_DIFFUSE,
        );
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.vertices[1].color, DEFAULT_DIFFUSE);
    }

    #[test]
    fn test_missing_file_is_a_load_error() {
        let err = Model::load(Path::new("does/not/exist.obj"))
            .err()
            .expect("loading a missing file must fail");
        assert!(matches!(err, VitrineError::ModelLoad { .. }));
    }
}
