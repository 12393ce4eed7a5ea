use wgpu::SurfaceError;

/// What the frame loop does after failing to acquire a surface texture.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; the next frame can render.
    Reconfigured,
    /// Transient; drop this frame.
    SkipFrame,
    /// Out of memory. The app should exit.
    Fatal,
}

impl SurfaceErrorAction {
    pub fn for_error(err: &SurfaceError) -> Self {
        match err {
            SurfaceError::Lost | SurfaceError::Outdated => Self::Reconfigured,
            SurfaceError::OutOfMemory => Self::Fatal,
            SurfaceError::Timeout | SurfaceError::Other => Self::SkipFrame,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        use SurfaceErrorAction as A;
        assert_eq!(A::for_error(&SurfaceError::Lost), A::Reconfigured);
        assert_eq!(A::for_error(&SurfaceError::Outdated), A::Reconfigured);
        assert_eq!(A::for_error(&SurfaceError::Timeout), A::SkipFrame);
        assert_eq!(A::for_error(&SurfaceError::OutOfMemory), A::Fatal);
    }
}
