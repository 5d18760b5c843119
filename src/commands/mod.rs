// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod init;
pub mod taxonomy;
pub mod records;
pub mod dreams;
pub mod fund;
pub mod overview;
pub mod exporter;
