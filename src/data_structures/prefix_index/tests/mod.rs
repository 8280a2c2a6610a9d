// Copyright (c) 2025 StoreZen Authors
//
// Licensed under the MIT License (LICENSE or https://opensource.org/licenses/MIT)

//! Unit and property-based tests for the product prefix index.
