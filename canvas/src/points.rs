//! GPU point-cloud renderer shared by the particle field and woven light engines.

use glam::Mat4;
use web_sys::{WebGl2RenderingContext as GL, WebGlBuffer, WebGlUniformLocation, WebGlVertexArrayObject};

use crate::gl::{GlError, Program, create_buffer, upload};
use crate::particles::ParticleSet;

const VERTEX_SRC: &str = include_str!("shaders/points.vert");
const FRAGMENT_SRC: &str = include_str!("shaders/points.frag");

/// How points are sized and blended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointStyle {
    /// World-space point size, attenuated by distance.
    pub size: f32,
    pub opacity: f32,
    pub additive: bool,
}

pub struct PointCloud {
    program: Program,
    vao: WebGlVertexArrayObject,
    positions: WebGlBuffer,
    colors: WebGlBuffer,
    count: i32,
    style: PointStyle,
    u_model_view: Option<WebGlUniformLocation>,
    u_projection: Option<WebGlUniformLocation>,
    u_size: Option<WebGlUniformLocation>,
    u_scale: Option<WebGlUniformLocation>,
    u_opacity: Option<WebGlUniformLocation>,
}

impl PointCloud {
    /// Upload `set` and build the point program.
    ///
    /// # Errors
    ///
    /// Returns [`GlError`] if the program fails to build or a buffer cannot be created.
    /// Anything allocated before the failure is released.
    pub fn new(gl: &GL, set: &ParticleSet, style: PointStyle) -> Result<Self, GlError> {
        let program = Program::build(gl, VERTEX_SRC, FRAGMENT_SRC)?;
        let Some(vao) = gl.create_vertex_array() else {
            program.delete(gl);
            return Err(GlError::Create("vertex array"));
        };
        gl.bind_vertex_array(Some(&vao));

        let positions = match create_buffer(gl, set.positions(), GL::DYNAMIC_DRAW) {
            Ok(buffer) => buffer,
            Err(err) => {
                gl.delete_vertex_array(Some(&vao));
                program.delete(gl);
                return Err(err);
            }
        };
        gl.enable_vertex_attrib_array(0);
        gl.vertex_attrib_pointer_with_i32(0, 3, GL::FLOAT, false, 0, 0);

        let colors = match create_buffer(gl, set.colors(), GL::STATIC_DRAW) {
            Ok(buffer) => buffer,
            Err(err) => {
                gl.delete_buffer(Some(&positions));
                gl.delete_vertex_array(Some(&vao));
                program.delete(gl);
                return Err(err);
            }
        };
        gl.enable_vertex_attrib_array(1);
        gl.vertex_attrib_pointer_with_i32(1, 3, GL::FLOAT, false, 0, 0);
        gl.bind_vertex_array(None);

        Ok(Self {
            u_model_view: program.uniform(gl, "u_model_view"),
            u_projection: program.uniform(gl, "u_projection"),
            u_size: program.uniform(gl, "u_size"),
            u_scale: program.uniform(gl, "u_scale"),
            u_opacity: program.uniform(gl, "u_opacity"),
            program,
            vao,
            positions,
            colors,
            count: set.count() as i32,
            style,
        })
    }

    /// Re-upload positions after an in-place simulation step.
    pub fn update_positions(&self, gl: &GL, positions: &[f32]) {
        upload(gl, &self.positions, positions, GL::DYNAMIC_DRAW);
    }

    /// Clear and draw. `pixel_height` is the drawing-buffer height in device pixels.
    pub fn draw(&self, gl: &GL, model_view: Mat4, projection: Mat4, pixel_height: u32) {
        gl.clear_color(0.0, 0.0, 0.0, 0.0);
        gl.clear(GL::COLOR_BUFFER_BIT);
        gl.disable(GL::DEPTH_TEST);
        gl.enable(GL::BLEND);
        if self.style.additive {
            gl.blend_func(GL::SRC_ALPHA, GL::ONE);
        } else {
            gl.blend_func(GL::SRC_ALPHA, GL::ONE_MINUS_SRC_ALPHA);
        }

        gl.use_program(Some(&self.program.program));
        gl.uniform_matrix4fv_with_f32_array(self.u_model_view.as_ref(), false, &model_view.to_cols_array());
        gl.uniform_matrix4fv_with_f32_array(self.u_projection.as_ref(), false, &projection.to_cols_array());
        gl.uniform1f(self.u_size.as_ref(), self.style.size);
        gl.uniform1f(self.u_scale.as_ref(), pixel_height as f32 * 0.5);
        gl.uniform1f(self.u_opacity.as_ref(), self.style.opacity);

        gl.bind_vertex_array(Some(&self.vao));
        gl.draw_arrays(GL::POINTS, 0, self.count);
        gl.bind_vertex_array(None);
    }

    /// Release every GPU object this cloud owns.
    pub fn delete(&self, gl: &GL) {
        gl.delete_buffer(Some(&self.positions));
        gl.delete_buffer(Some(&self.colors));
        gl.delete_vertex_array(Some(&self.vao));
        self.program.delete(gl);
    }
}
