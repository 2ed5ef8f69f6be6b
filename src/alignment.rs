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
use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
/// Anchor of a component inside its parent, on a 3x3 grid.
pub enum Alignment {
    /// Top left corner, the component keeps its own offset.
    #[default]
    TopLeft,
    /// Top edge, horizontally centered.
    TopCenter,
    /// Top right corner.
    TopRight,
    /// Left edge, vertically centered.
    CenterLeft,
    /// Centered on both axes.
    Center,
    /// Right edge, vertically centered.
    CenterRight,
    /// Bottom left corner.
    BottomLeft,
    /// Bottom edge, horizontally centered.
    BottomCenter,
    /// Bottom right corner.
    BottomRight,
}

/// Returns the offset that places something of size `component` inside `parent` according to `alignment`.
///
/// Offsets are relative to the parent origin. Components larger than the parent get negative offsets,
/// which keeps them centered (or right/bottom aligned) on the parent rather than clamped.
pub fn anchor_offset(component: Dimensioni, parent: Dimensioni, alignment: Alignment) -> Vec2i {
    let center_x = (parent.width - component.width) / 2;
    let center_y = (parent.height - component.height) / 2;
    let right = parent.width - component.width;
    let bottom = parent.height - component.height;
    match alignment {
        Alignment::TopLeft => vec2(0, 0),
        Alignment::TopCenter => vec2(center_x, 0),
        Alignment::TopRight => vec2(right, 0),
        Alignment::CenterLeft => vec2(0, center_y),
        Alignment::Center => vec2(center_x, center_y),
        Alignment::CenterRight => vec2(right, center_y),
        Alignment::BottomLeft => vec2(0, bottom),
        Alignment::BottomCenter => vec2(center_x, bottom),
        Alignment::BottomRight => vec2(right, bottom),
    }
}
