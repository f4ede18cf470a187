//! Launcher script templates.
//!
//! Placeholders: `{root}` (already quoted for the target shell), `{app}`,
//! `{binary}`, `{repository}`, `{branch}`, `{vc_arch}`.

/// POSIX shell launcher.
pub const POSIX_LAUNCHER: &str = r#"#!/bin/sh

KILN_ROOT={root}
UNAME=$(uname)

clone_{app}() {
    if [ ! -d "{app}" ]; then
        echo "Cloning {app} repository..."
        git clone -q "{repository}" "{app}" || return 1
        cd "{app}" || return 1
    else
        cd "{app}" || return 1
        echo "Resetting {app} repository..."
        git fetch -q origin || return 1
        git reset -q --hard "origin/{branch}" || return 1
        git clean -q -xdf || return 1
    fi
}

build_{app}() {
    make -C "build-$UNAME"
}

install_{app}() {
    ./{app} setup --local
}

if [ "$1" = "upgrade" ]; then
    mkdir -p "$KILN_ROOT/src" || exit 1
    cd "$KILN_ROOT/src" || exit 1
    clone_{app} && build_{app} && install_{app}
else
    exec "$KILN_ROOT/{binary}" "$@"
fi
"#;

/// Windows batch launcher.
///
/// Without `nmake` on `PATH`, the script loads the newest Visual C++
/// developer environment found by `vswhere` before doing anything else.
pub const WINDOWS_LAUNCHER: &str = r#"@ECHO OFF

SET KILN_ROOT={root}

where nmake > nul 2>&1
IF ERRORLEVEL 1 CALL :vc_shell

IF [%1] == [upgrade] GOTO upgrade
%KILN_ROOT%\{binary} %*
exit /b %ERRORLEVEL%

:vc_shell
SET "VSWHERE=%ProgramFiles(x86)%\Microsoft Visual Studio\Installer\vswhere.exe"
IF NOT EXIST "%VSWHERE%" exit /b 1
FOR /F "usebackq tokens=*" %%i IN (`"%VSWHERE%" -latest -products * -property installationPath`) DO SET "VS_PATH=%%i"
IF NOT DEFINED VS_PATH exit /b 1
CALL "%VS_PATH%\VC\Auxiliary\Build\vcvarsall.bat" {vc_arch} > nul
exit /b %ERRORLEVEL%

:upgrade
where nmake > nul 2>&1
IF ERRORLEVEL 1 (
    echo nmake not found, install the Visual C++ build tools
    exit /b 1
)

IF NOT EXIST %KILN_ROOT%\src mkdir %KILN_ROOT%\src
cd /D %KILN_ROOT%\src

IF NOT EXIST "{app}" (
    echo Cloning {app} repository...
    git clone -q "{repository}" "{app}" || exit /b 1
    cd "{app}"
) ELSE (
    cd "{app}"
    echo Resetting {app} repository...
    git fetch -q origin || exit /b 1
    git reset -q --hard origin/{branch} || exit /b 1
    git clean -q -xdf || exit /b 1
)

cd build-Windows
nmake /NOLOGO /F {app}.mak || exit /b 1
cd ..

{app}.exe setup --local
"#;
