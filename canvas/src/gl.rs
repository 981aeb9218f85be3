//! WebGL2 program and buffer helpers shared by the GPU engines.

use web_sys::{WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram, WebGlShader, WebGlUniformLocation};

#[derive(Debug, thiserror::Error)]
pub enum GlError {
    #[error("could not create {0}")]
    Create(&'static str),
    #[error("shader compile failed: {0}")]
    Compile(String),
    #[error("program link failed: {0}")]
    Link(String),
}

/// A linked program together with the shaders it owns.
pub struct Program {
    pub program: WebGlProgram,
    vertex: WebGlShader,
    fragment: WebGlShader,
}

impl Program {
    /// Compile both stages and link them.
    ///
    /// # Errors
    ///
    /// Returns [`GlError`] with the driver's info log on compile or link failure.
    /// Shaders created before the failure are deleted.
    pub fn build(gl: &GL, vertex_src: &str, fragment_src: &str) -> Result<Self, GlError> {
        let vertex = compile_shader(gl, GL::VERTEX_SHADER, vertex_src)?;
        let fragment = match compile_shader(gl, GL::FRAGMENT_SHADER, fragment_src) {
            Ok(shader) => shader,
            Err(err) => {
                gl.delete_shader(Some(&vertex));
                return Err(err);
            }
        };

        let Some(program) = gl.create_program() else {
            gl.delete_shader(Some(&vertex));
            gl.delete_shader(Some(&fragment));
            return Err(GlError::Create("program"));
        };
        gl.attach_shader(&program, &vertex);
        gl.attach_shader(&program, &fragment);
        gl.link_program(&program);

        let linked = gl
            .get_program_parameter(&program, GL::LINK_STATUS)
            .as_bool()
            .unwrap_or(false);
        if !linked {
            let log = gl.get_program_info_log(&program).unwrap_or_default();
            gl.delete_program(Some(&program));
            gl.delete_shader(Some(&vertex));
            gl.delete_shader(Some(&fragment));
            return Err(GlError::Link(log));
        }

        Ok(Self { program, vertex, fragment })
    }

    #[must_use]
    pub fn uniform(&self, gl: &GL, name: &str) -> Option<WebGlUniformLocation> {
        gl.get_uniform_location(&self.program, name)
    }

    /// Release the program and both shaders.
    pub fn delete(&self, gl: &GL) {
        gl.delete_program(Some(&self.program));
        gl.delete_shader(Some(&self.vertex));
        gl.delete_shader(Some(&self.fragment));
    }
}

fn compile_shader(gl: &GL, kind: u32, source: &str) -> Result<WebGlShader, GlError> {
    let shader = gl.create_shader(kind).ok_or(GlError::Create("shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    let compiled = gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);
    if compiled {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(GlError::Compile(log))
    }
}

/// Create a buffer and fill it with `data`.
///
/// # Errors
///
/// Returns [`GlError::Create`] if the context cannot allocate a buffer.
pub fn create_buffer(gl: &GL, data: &[f32], usage: u32) -> Result<WebGlBuffer, GlError> {
    let buffer = gl.create_buffer().ok_or(GlError::Create("buffer"))?;
    upload(gl, &buffer, data, usage);
    Ok(buffer)
}

/// Replace the contents of `buffer` with `data`.
pub fn upload(gl: &GL, buffer: &WebGlBuffer, data: &[f32], usage: u32) {
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(buffer));
    let array = js_sys::Float32Array::from(data);
    gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &array, usage);
}
