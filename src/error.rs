//
// Copyright 2022-Present (c) Raja Lehtihet & Wael El Oraiby
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice,
// this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors
// may be used to endorse or promote products derived from this software without
// specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE
// LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR
// CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF
// SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
// INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN
// CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE)
// ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
// POSSIBILITY OF SUCH DAMAGE.
//
use crate::WidgetId;

/// Errors reported by the scene, the canvas and the config store.
#[derive(Debug, thiserror::Error)]
pub enum UiError {
    /// `create_widget` was called before the previous build was closed with `end_widget`.
    #[error("end_widget must be called before creating another widget")]
    AlreadyBuilding,
    /// A component was added while no widget was current.
    #[error("no widget selected")]
    NoCurrentWidget,
    /// `begin_widget` found no widget with the requested id.
    #[error("widget with id {0} not found")]
    WidgetNotFound(WidgetId),
    /// An image could not be decoded or uploaded.
    #[error("image error: {0}")]
    Image(String),
    /// A font could not be loaded or rasterized.
    #[error("font error: {0}")]
    Font(String),
    /// Underlying file I/O failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl UiError {
    /// Returns `true` for errors caused by calling the construction API in the wrong order.
    pub fn is_usage(&self) -> bool { matches!(self, Self::AlreadyBuilding | Self::NoCurrentWidget | Self::WidgetNotFound(_)) }
}
