use super::OptionMeta;

const fn opt(scope: &'static str, name: &'static str) -> OptionMeta {
	OptionMeta {
		scope,
		name,
		multiple: false,
		sysenvvar: None,
		oldnames: &[],
	}
}

impl OptionMeta {
	const fn multi(mut self) -> Self {
		self.multiple = true;
		self
	}

	const fn sysenv(mut self, var: &'static str) -> Self {
		self.sysenvvar = Some(var);
		self
	}

	const fn renamed_from(mut self, names: &'static [&'static str]) -> Self {
		self.oldnames = names;
		self
	}
}

/// Every option the resolver knows about.
pub static OPTIONS: &[OptionMeta] = &[
	// [platformio]
	opt("platformio", "description"),
	opt("platformio", "env_default").multi(),
	opt("platformio", "extra_configs").multi(),
	opt("platformio", "core_dir")
		.sysenv("PLATFORMIO_CORE_DIR")
		.renamed_from(&["home_dir"]),
	opt("platformio", "globallib_dir").sysenv("PLATFORMIO_GLOBALLIB_DIR"),
	opt("platformio", "platforms_dir").sysenv("PLATFORMIO_PLATFORMS_DIR"),
	opt("platformio", "packages_dir").sysenv("PLATFORMIO_PACKAGES_DIR"),
	opt("platformio", "cache_dir").sysenv("PLATFORMIO_CACHE_DIR"),
	opt("platformio", "build_cache_dir").sysenv("PLATFORMIO_BUILD_CACHE_DIR"),
	opt("platformio", "workspace_dir").sysenv("PLATFORMIO_WORKSPACE_DIR"),
	opt("platformio", "build_dir").sysenv("PLATFORMIO_BUILD_DIR"),
	opt("platformio", "libdeps_dir").sysenv("PLATFORMIO_LIBDEPS_DIR"),
	opt("platformio", "lib_dir").sysenv("PLATFORMIO_LIB_DIR"),
	opt("platformio", "include_dir").sysenv("PLATFORMIO_INCLUDE_DIR"),
	opt("platformio", "src_dir").sysenv("PLATFORMIO_SRC_DIR"),
	opt("platformio", "test_dir").sysenv("PLATFORMIO_TEST_DIR"),
	opt("platformio", "boards_dir").sysenv("PLATFORMIO_BOARDS_DIR"),
	opt("platformio", "data_dir").sysenv("PLATFORMIO_DATA_DIR"),
	opt("platformio", "shared_dir").sysenv("PLATFORMIO_SHARED_DIR"),
	// [env] and [env:*]
	opt("env", "platform"),
	opt("env", "platform_packages").multi(),
	opt("env", "framework").multi(),
	opt("env", "board"),
	opt("env", "board_build.mcu"),
	opt("env", "board_build.f_cpu"),
	opt("env", "board_build.ldscript"),
	opt("env", "build_flags")
		.multi()
		.sysenv("PLATFORMIO_BUILD_FLAGS"),
	opt("env", "src_build_flags")
		.multi()
		.sysenv("PLATFORMIO_SRC_BUILD_FLAGS"),
	opt("env", "build_unflags").multi(),
	opt("env", "src_filter")
		.multi()
		.sysenv("PLATFORMIO_SRC_FILTER"),
	opt("env", "targets").multi(),
	opt("env", "upload_port").sysenv("PLATFORMIO_UPLOAD_PORT"),
	opt("env", "upload_protocol"),
	opt("env", "upload_speed"),
	opt("env", "upload_flags")
		.multi()
		.sysenv("PLATFORMIO_UPLOAD_FLAGS"),
	opt("env", "upload_resetmethod"),
	opt("env", "lib_deps")
		.multi()
		.renamed_from(&["lib_use", "lib_force", "lib_install"]),
	opt("env", "lib_ignore").multi(),
	opt("env", "lib_extra_dirs")
		.multi()
		.sysenv("PLATFORMIO_LIB_EXTRA_DIRS"),
	opt("env", "lib_ldf_mode"),
	opt("env", "lib_compat_mode"),
	opt("env", "lib_archive"),
	opt("env", "test_filter").multi(),
	opt("env", "test_ignore").multi(),
	opt("env", "test_port"),
	opt("env", "test_speed"),
	opt("env", "test_transport"),
	opt("env", "test_build_project_src"),
	opt("env", "debug_tool"),
	opt("env", "debug_init_break"),
	opt("env", "debug_init_cmds").multi(),
	opt("env", "debug_extra_cmds").multi(),
	opt("env", "debug_load_cmd"),
	opt("env", "debug_server").multi(),
	opt("env", "debug_port"),
	opt("env", "debug_svd_path"),
	opt("env", "monitor_port"),
	opt("env", "monitor_speed").renamed_from(&["monitor_baud"]),
	opt("env", "monitor_rts"),
	opt("env", "monitor_dtr"),
	opt("env", "extra_scripts")
		.multi()
		.sysenv("PLATFORMIO_EXTRA_SCRIPTS")
		.renamed_from(&["extra_script"]),
];
